use crate::copy;
use crate::game::Prize;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub prize: Prize,
}

/// Winning prize plus redemption instructions.
#[function_component(ResultModal)]
pub fn result_modal(p: &Props) -> Html {
    let badge_style = format!("background-color: {};", p.prize.color);

    html! {
        <div class="result-modal" role="dialog" aria-modal="true" aria-labelledby="result-title">
            <div class="result-content">
                <h2 id="result-title">{ copy::CONGRATS }</h2>
                <p>{ copy::YOU_WON }</p>
                <div class="prize-result" style={badge_style}>
                    { p.prize.name.clone() }
                </div>
                <div class="instagram-instructions">
                    <h3>{ copy::NEXT_STEPS }</h3>
                    <ol>
                        { for copy::STEPS.iter().map(|step| html! { <li>{ *step }</li> }) }
                    </ol>
                    <a
                        href={copy::PROFILE_URL}
                        target="_blank"
                        rel="noopener noreferrer"
                        class="instagram-link-button"
                    >
                        { copy::GO_TO_PROFILE }
                    </a>
                    <p class="prize-note">{ copy::KEEP_RESULT }</p>
                    <p class="deadline-note">{ copy::DEADLINE }</p>
                    <p class="validation-warning">{ copy::VALIDATION }</p>
                </div>
            </div>
        </div>
    }
}
