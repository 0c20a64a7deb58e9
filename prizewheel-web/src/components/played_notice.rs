use crate::copy;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub session_id: AttrValue,
    pub on_clear: Callback<()>,
}

/// Shown instead of the spin button once the device has played.
#[function_component(PlayedNotice)]
pub fn played_notice(p: &Props) -> Html {
    let on_click = {
        let cb = p.on_clear.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="already-played-message" role="status">
            <p>{ copy::ALREADY_PLAYED }</p>
            <p class="session-info">{ format!("{} {}", copy::SESSION_LABEL, p.session_id) }</p>
            <button class="clear-button" onclick={on_click}>
                { copy::CLEAR_DATA }
            </button>
        </div>
    }
}
