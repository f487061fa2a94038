use twinflip_core as game;
use game::{Command, GameSession, SessionConfig, SessionState, Task, TaskHandle, Tier};
use yew::prelude::*;

use crate::scheduler::WebScheduler;
use crate::settings::Settings;
use crate::storage::{BrowserStorage, LocalOrDefault};
use crate::utils::Overlay;

type Session = GameSession<WebScheduler, BrowserStorage>;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Command(Command),
    TaskFired(TaskHandle, Task),
}

fn face_class(face: game::CardFace) -> &'static str {
    match face {
        game::CardFace::Down => "down",
        game::CardFace::Up => "up",
        game::CardFace::Matched => "matched",
    }
}

fn status_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "Start",
        SessionState::Playing | SessionState::Won => "Restart",
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    position: game::Position,
    face: game::CardFace,
    glyph: Option<&'static str>,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::Position>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        position,
        face,
        glyph,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!("card", face_class(face));
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", position);
        callback.emit(position);
    });

    html! {
        <button {class} {onclick}>{glyph.unwrap_or_default()}</button>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct WinProps {
    summary: game::WinSummary,
    on_dismiss: Callback<MouseEvent>,
    on_restart: Callback<MouseEvent>,
}

#[function_component(WinDialog)]
fn win_dialog(props: &WinProps) -> Html {
    let game::WinSummary {
        moves,
        elapsed_secs,
        is_new_record,
        ..
    } = props.summary;

    html! {
        <Overlay class={classes!("win")}>
            <article>
                <h2>{"All pairs found!"}</h2>
                <p>{format!("{} moves in {}", moves, game::format_elapsed(elapsed_secs))}</p>
                {
                    if is_new_record {
                        html! { <p class="record">{"New best score!"}</p> }
                    } else {
                        html! {}
                    }
                }
                <footer>
                    <button onclick={props.on_dismiss.clone()}>{"Close"}</button>
                    <button onclick={props.on_restart.clone()}>{"Play again"}</button>
                </footer>
            </article>
        </Overlay>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub config: SessionConfig,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: Session,
}

impl GameView {
    fn tier_button(&self, ctx: &Context<Self>, tier: Tier) -> Html {
        let onclick = ctx
            .link()
            .callback(move |_: MouseEvent| Msg::Command(Command::ChangeDifficulty(tier)));
        let class = classes!((self.session.tier() == tier).then_some("selected"));

        html! {
            <button {class} {onclick}>{tier.name()}</button>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let session = &self.session;
        let locked = session.engine().is_some_and(game::PlayEngine::is_locked);
        let style = format!(
            "grid-template-columns: repeat({}, 1fr)",
            session.tier().columns()
        );
        let callback = ctx
            .link()
            .callback(|position: game::Position| Msg::Command(Command::Flip(position)));

        html! {
            <div class="board" {style}>
                {
                    for (0..session.card_count()).map(|position| html! {
                        <CardView
                            {position}
                            face={session.face_at(position)}
                            glyph={session.visible_glyph(position)}
                            {locked}
                            callback={callback.clone()}
                        />
                    })
                }
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let scheduler = WebScheduler::new(
            ctx.link()
                .callback(|(handle, task): (TaskHandle, Task)| Msg::TaskFired(handle, task)),
        );
        Self {
            session: GameSession::new(ctx.props().config, scheduler, BrowserStorage),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Command(command) => {
                log::debug!("command: {:?}", command);
                match self.session.handle(command) {
                    Ok(outcome) => {
                        if let Command::ChangeDifficulty(tier) = command {
                            Settings { tier }.local_save();
                        }
                        outcome.has_update()
                    }
                    Err(err) => {
                        log::error!("{:?} rejected: {}", command, err);
                        false
                    }
                }
            }
            Msg::TaskFired(handle, task) => {
                self.session.scheduler_mut().forget(handle);
                self.session.on_task(task)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = &self.session;
        let state = session.state();
        let start_command = match state {
            SessionState::Idle => Command::Start,
            SessionState::Playing | SessionState::Won => Command::Restart,
        };
        let cb_start = ctx
            .link()
            .callback(move |_: MouseEvent| Msg::Command(start_command));
        let cb_dismiss = ctx
            .link()
            .callback(|_: MouseEvent| Msg::Command(Command::DismissWin));
        let cb_restart = ctx
            .link()
            .callback(|_: MouseEvent| Msg::Command(Command::Restart));

        let total_pairs = session
            .engine()
            .map_or_else(|| session.tier().pairs(), game::PlayEngine::total_pairs);

        html! {
            <div class="twinflip">
                <nav>
                    <aside class="moves">{format!("Moves {}", session.moves())}</aside>
                    <aside class="pairs">{format!("Pairs {}/{}", session.matched_pairs(), total_pairs)}</aside>
                    <aside class="time">{game::format_elapsed(session.elapsed_secs())}</aside>
                    <aside class="best">{format!("Best {}", game::format_best(session.best_score()))}</aside>
                </nav>
                <menu>
                    { for Tier::ALL.into_iter().map(|tier| self.tier_button(ctx, tier)) }
                    <button class="start" onclick={cb_start}>{status_label(state)}</button>
                </menu>
                { self.view_board(ctx) }
                {
                    match session.win_dialog() {
                        Some(summary) => html! {
                            <WinDialog {summary} on_dismiss={cb_dismiss} on_restart={cb_restart}/>
                        },
                        None => html! {},
                    }
                }
            </div>
        }
    }
}
