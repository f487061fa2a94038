use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct OverlayProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

/// Open `<dialog>` mounted on `document.body`, outside the board grid.
#[function_component]
pub(crate) fn Overlay(props: &OverlayProps) -> Html {
    let dialog = html! {
        <dialog class={props.class.clone()} open={true}>{props.children.clone()}</dialog>
    };
    create_portal(dialog, gloo::utils::body().into())
}

/// Seed for games the URL does not pin, built from two `Math.random` draws.
pub(crate) fn js_random_seed() -> u64 {
    let draw = js_sys::Math::random;
    seed_from_draws(draw(), draw())
}

/// Packs two uniform draws in `[0, 1)` into the high and low halves of a seed.
fn seed_from_draws(high: f64, low: f64) -> u64 {
    let half = |draw: f64| (draw * 4_294_967_296.0) as u32;
    (u64::from(half(high)) << 32) | u64::from(half(low))
}

/// Numeric seeds are used as-is, any other text is hashed (FNV-1a) so shared links stay reproducible.
pub(crate) fn parse_seed(seed: &str) -> u64 {
    if let Ok(seed) = seed.parse() {
        return seed;
    }

    seed.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}
