use crate::game::{Prize, segment_angle, segment_label_angle};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub prizes: Vec<Prize>,
    /// Target angle in degrees; 0 shows the wheel at rest.
    #[prop_or_default]
    pub rotation: f64,
    #[prop_or_default]
    pub spinning: bool,
}

fn segment_style(prize: &Prize, index: usize, len: usize) -> String {
    format!(
        "transform: rotate({:.4}deg); background-color: {};",
        segment_angle(index, len),
        prize.color
    )
}

/// The wheel graphic: one colored segment per prize and a fixed pointer.
#[function_component(Wheel)]
pub fn wheel(p: &Props) -> Html {
    let len = p.prizes.len();
    let label_style = format!("transform: rotate({:.4}deg);", segment_label_angle(len));
    let wheel_class = classes!("wheel", p.spinning.then_some("wheel--spinning"));
    let wheel_style = format!("transform: rotate({:.4}deg);", p.rotation);

    html! {
        <div class="wheel-container">
            <div class={wheel_class} style={wheel_style}>
                { for p.prizes.iter().enumerate().map(|(index, prize)| html! {
                    <div
                        key={prize.id.to_string()}
                        class="wheel-segment"
                        style={segment_style(prize, index, len)}
                    >
                        <div class="prize-text" style={label_style.clone()}>
                            { prize.name.clone() }
                        </div>
                    </div>
                }) }
            </div>
            <div class="wheel-pointer"></div>
        </div>
    }
}
