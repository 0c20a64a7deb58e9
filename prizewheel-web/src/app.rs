use crate::components::played_notice::PlayedNotice;
use crate::components::result_modal::ResultModal;
use crate::components::spin_button::SpinButton;
use crate::components::wheel::Wheel;
use crate::copy;
use crate::game::{Clock, KeyValueStore, Prize, SpinError, WheelSession};
use std::cell::RefCell;
use yew::prelude::*;

/// Everything the page needs to draw one frame of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelView {
    pub prizes: Vec<Prize>,
    pub rotation: f64,
    pub spinning: bool,
    pub has_played: bool,
    pub result: Option<Prize>,
    pub session_id: AttrValue,
}

impl WheelView {
    #[must_use]
    pub fn from_session<S: KeyValueStore>(session: &WheelSession<S>, rotation: f64) -> Self {
        Self {
            prizes: session.table().prizes().to_vec(),
            rotation,
            spinning: session.is_spinning(),
            has_played: session.is_played(),
            result: session.prior_result().cloned(),
            session_id: AttrValue::from(session.session_id().to_string()),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct WheelPageProps {
    pub view: WheelView,
    pub on_spin: Callback<()>,
    pub on_clear: Callback<()>,
}

#[function_component(WheelPage)]
pub fn wheel_page(p: &WheelPageProps) -> Html {
    let view = &p.view;
    let controls = if view.has_played {
        html! { <PlayedNotice session_id={view.session_id.clone()} on_clear={p.on_clear.clone()} /> }
    } else {
        html! { <SpinButton spinning={view.spinning} on_spin={p.on_spin.clone()} /> }
    };
    let result = view
        .result
        .clone()
        .map_or_else(Html::default, |prize| html! { <ResultModal {prize} /> });

    html! {
        <div class="app">
            <header class="header">
                <div class="logo-container">
                    <img src={copy::LOGO_URL} alt={copy::LOGO_ALT} class="barbershop-logo" />
                </div>
                <h1>{ copy::TITLE }</h1>
                <p>{ copy::TAGLINE }</p>
            </header>
            <Wheel prizes={view.prizes.clone()} rotation={view.rotation} spinning={view.spinning} />
            <div class="controls">
                { controls }
                { result }
            </div>
            <div class="instagram-section">
                <a
                    href={copy::PROFILE_URL}
                    target="_blank"
                    rel="noopener noreferrer"
                    class="instagram-button"
                >
                    <span class="instagram-icon">{ "📸" }</span>
                    { copy::FOLLOW }
                </a>
            </div>
        </div>
    }
}

/// Wait out the reveal window, then commit the result.
///
/// A failed wait drops the pending spin so the wheel is ready again.
#[allow(clippy::future_not_send)]
pub async fn reveal_when_due<S, C, F, Fut>(
    wheel: &RefCell<WheelSession<S>>,
    reveal_at_ms: u64,
    clock: &C,
    mut sleep: F,
) where
    S: KeyValueStore,
    C: Clock,
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    let mut wait = reveal_at_ms.saturating_sub(clock.now_ms());
    loop {
        if let Err(err) = sleep(wait).await {
            log::error!("reveal timer failed: {err}");
            wheel.borrow_mut().abandon();
            return;
        }
        match wheel.borrow_mut().reveal_after_delay(clock.now_ms()) {
            Ok(prize) => {
                log::info!("revealed prize {}", prize.id);
                return;
            }
            Err(SpinError::RevealNotDue { remaining_ms }) => wait = remaining_ms,
            Err(err) => {
                log::warn!("reveal skipped: {err}");
                return;
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod live {
    use super::{WheelPage, WheelView, reveal_when_due};
    use crate::dom;
    use crate::game::{BrowserClock, entropy_rng, open_browser_session};
    use yew::prelude::*;

    #[function_component(App)]
    pub fn app() -> Html {
        let rng = use_mut_ref(entropy_rng);
        let wheel = {
            let rng = rng.clone();
            use_mut_ref(move || open_browser_session(&mut rng.borrow_mut()))
        };
        let view = {
            let wheel = wheel.clone();
            use_state(move || WheelView::from_session(&*wheel.borrow(), 0.0))
        };

        let on_spin = {
            let wheel = wheel.clone();
            let view = view.clone();
            Callback::from(move |()| {
                let pending = match wheel
                    .borrow_mut()
                    .commit_selection(&mut *rng.borrow_mut(), dom::now_ms())
                {
                    Ok(pending) => pending,
                    Err(err) => {
                        log::info!("spin ignored: {err}");
                        return;
                    }
                };
                view.set(WheelView::from_session(&*wheel.borrow(), pending.rotation));

                let wheel = wheel.clone();
                let view = view.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    reveal_when_due(&*wheel, pending.reveal_at_ms, &BrowserClock, |ms| async move {
                        dom::sleep_ms(ms)
                            .await
                            .map_err(|err| dom::js_error_message(&err))
                    })
                    .await;
                    view.set(WheelView::from_session(&*wheel.borrow(), pending.rotation));
                });
            })
        };

        let on_clear = {
            let view = view.clone();
            Callback::from(move |()| {
                wheel.borrow_mut().clear();
                view.set(WheelView::from_session(&*wheel.borrow(), 0.0));
            })
        };

        html! {
            <WheelPage view={(*view).clone()} {on_spin} {on_clear} />
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use live::App;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ManualClock, MemoryStore, Phase, PrizeTable, WheelConfig};
    use futures::executor::block_on;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn fresh_wheel(rng: &mut ChaCha20Rng) -> WheelSession<MemoryStore> {
        WheelSession::load(
            PrizeTable::default_table(),
            WheelConfig::default(),
            MemoryStore::new(),
            0,
            rng,
        )
    }

    #[test]
    fn view_tracks_session_phase() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut wheel = WheelSession::load(
            PrizeTable::default_table(),
            WheelConfig::default(),
            MemoryStore::new(),
            0,
            &mut rng,
        );
        let idle = WheelView::from_session(&wheel, 0.0);
        assert!(!idle.spinning && !idle.has_played && idle.result.is_none());
        assert_eq!(idle.prizes.len(), 7);

        let pending = wheel.commit_selection(&mut rng, 0).unwrap();
        let spinning = WheelView::from_session(&wheel, pending.rotation);
        assert!(spinning.spinning);
        assert!(spinning.result.is_none());

        wheel.reveal_after_delay(pending.reveal_at_ms).unwrap();
        let done = WheelView::from_session(&wheel, pending.rotation);
        assert!(done.has_played);
        assert_eq!(done.result, Some(pending.prize));
        assert_eq!(done.session_id.as_str(), wheel.session_id().as_str());
    }

    #[test]
    fn reveal_waits_out_the_delay() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let clock = ManualClock::starting_at(1_000);
        let wheel = RefCell::new(fresh_wheel(&mut rng));
        let pending = wheel
            .borrow_mut()
            .commit_selection(&mut rng, clock.now_ms())
            .unwrap();

        // First timer fires early; the remaining window is slept again.
        let mut calls = Vec::new();
        block_on(reveal_when_due(&wheel, pending.reveal_at_ms, &clock, |ms| {
            calls.push(ms);
            clock.advance(if calls.len() == 1 { ms - 10 } else { ms });
            std::future::ready(Ok::<(), String>(()))
        }));

        assert_eq!(calls, vec![WheelConfig::default().reveal_delay_ms, 10]);
        assert_eq!(wheel.borrow().phase(), &Phase::Played(pending.prize));
        assert!(wheel.borrow().store().load_state().has_played);
    }

    #[test]
    fn failed_timer_releases_the_wheel() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let clock = ManualClock::starting_at(1_000);
        let wheel = RefCell::new(fresh_wheel(&mut rng));
        let pending = wheel
            .borrow_mut()
            .commit_selection(&mut rng, clock.now_ms())
            .unwrap();

        block_on(reveal_when_due(&wheel, pending.reveal_at_ms, &clock, |_| {
            std::future::ready(Err::<(), String>("window unavailable".to_string()))
        }));

        let wheel = wheel.borrow();
        assert_eq!(wheel.phase(), &Phase::Ready);
        assert!(!wheel.store().load_state().has_played);
        let view = WheelView::from_session(&*wheel, 0.0);
        assert!(!view.spinning && !view.has_played);
    }
}
