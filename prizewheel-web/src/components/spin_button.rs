use crate::copy;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub spinning: bool,
    pub on_spin: Callback<()>,
}

#[function_component(SpinButton)]
pub fn spin_button(p: &Props) -> Html {
    let on_click = {
        let cb = p.on_spin.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let label = if p.spinning { copy::SPINNING } else { copy::SPIN };

    html! {
        <button class="spin-button" onclick={on_click} disabled={p.spinning}>
            { label }
        </button>
    }
}
