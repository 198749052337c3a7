use crate::settings;
use crate::utils::*;
use bitflags::bitflags;
use chrono::prelude::*;
use gloo::timers::callback::Interval;
use raitsuauto_core as game;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Active,
    Won,
    WonAtStart,
}

impl ViewGameState {
    fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::WonAtStart)
    }
}

/// One played game: the engine plus the presentation bookkeeping that the
/// core deliberately does not track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GameSession {
    pub engine: game::PlayEngine,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub move_count: u32,
}

impl GameSession {
    fn new(engine: game::PlayEngine) -> Self {
        Self {
            engine,
            started_at: None,
            ended_at: None,
            move_count: 0,
        }
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn view_state(&self) -> ViewGameState {
        use game::EngineState::*;
        match self.engine.state() {
            Active => ViewGameState::Active,
            Won if self.move_count == 0 => ViewGameState::WonAtStart,
            Won => ViewGameState::Won,
        }
    }

    fn on_successful_move(&mut self, now: DateTime<Utc>) {
        self.move_count = self.move_count.saturating_add(1);

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.engine.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}

impl StorageKey for GameSession {
    const KEY: &'static str = "raitsuauto:game";
}

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::FlipOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::FlipOutcome| outcome.has_update())
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellPointerState {
    pos: game::Coord2,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    UpdateTime,
    NewGame,
    ToggleSettings,
    UpdateSettings(settings::Settings),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: game::Coord,
    y: game::Coord,
    lit: bool,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        x,
        y,
        lit,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!("cell");
    if lit {
        class.push("lit");
    }
    if pressed {
        class.push("pressed");
    }

    let onmousedown = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            let pointer_state = CellPointerState {
                pos: (x, y),
                buttons,
            };
            callback.emit(CellMsg::Update(pointer_state));
            log::trace!("({}, {}) mouse down ({:?})", x, y, buttons);
        })
    };

    let onmouseup = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            let pointer_state = CellPointerState {
                pos: (x, y),
                buttons,
            };
            callback.emit(CellMsg::Update(pointer_state));
            log::trace!("({}, {}) mouse up ({:?})", x, y, buttons);
        })
    };

    let onmouseenter = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            let pointer_state = CellPointerState {
                pos: (x, y),
                buttons,
            };
            callback.emit(CellMsg::Update(pointer_state));
            log::trace!("({}, {}) mouse enter ({:?})", x, y, buttons);
        })
    };

    let onmouseleave = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Leave);
            log::trace!("({}, {}) mouse leave ({:?})", x, y, buttons);
        })
    };

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave}/>
    }
}

#[derive(Properties, Debug, Clone, PartialEq, Default)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: settings::Settings,
    game: GameSession,
    seed: u64,
    prev_time: u32,
    settings_open: bool,
    current_cell_state: Option<CellPointerState>,
    _timer_interval: Interval,
}

impl GameView {
    fn new_session(settings: &settings::Settings, seed: u64) -> GameSession {
        use game::{BoardGenerator, RandomBoardGenerator};

        let board =
            RandomBoardGenerator::new(seed, settings.start_board()).generate(settings.game_config);
        GameSession::new(game::PlayEngine::new(board))
    }

    fn get_size(&self) -> game::Coord2 {
        self.game.engine.size()
    }

    fn get_time(&self) -> u32 {
        self.game.elapsed_secs(utc_now())
    }

    fn get_game_state(&self) -> ViewGameState {
        self.game.view_state()
    }

    fn is_mid_press(&self) -> bool {
        matches!(
            self.current_cell_state,
            Some(CellPointerState {
                buttons: MouseButtons::LEFT,
                ..
            })
        )
    }

    fn get_game_state_class(&self) -> Classes {
        classes!(match self.get_game_state() {
            ViewGameState::Active if self.is_mid_press() => "mid-press",
            ViewGameState::Active if self.game.move_count == 0 => "not-started",
            ViewGameState::Active => "in-progress",
            ViewGameState::Won => "win",
            ViewGameState::WonAtStart => "instant-win",
        })
    }

    fn is_playable(&self) -> bool {
        matches!(self.get_game_state(), ViewGameState::Active)
    }

    fn flip_cell(&mut self, coords: game::Coord2) -> bool {
        let now = utc_now();
        let updated = self.game.engine.flip(coords).has_update();

        if updated {
            self.game.on_successful_move(now);
        }

        updated
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn is_pressed(&self, coords: game::Coord2) -> bool {
        if self.get_game_state().is_finished() {
            return false;
        }

        matches!(
            self.current_cell_state,
            Some(CellPointerState {
                pos,
                buttons: MouseButtons::LEFT,
            }) if pos == coords
        )
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings = settings::Settings::local_or_default();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let game = GameSession::local_get().unwrap_or_else(|| Self::new_session(&settings, seed));

        Self {
            settings,
            game,
            seed,
            prev_time: 0,
            settings_open: false,
            current_cell_state: None,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        let updated = match msg {
            CellEvent(Leave) => {
                log::trace!("cell leave");
                self.current_cell_state.take().is_some()
            }
            CellEvent(Update(cell_state)) => {
                log::trace!("cell update: {:?}", cell_state);
                if cell_state.buttons.is_empty() {
                    // all buttons were released inside cell_state.pos; only a
                    // plain left release presses the cell
                    match self.current_cell_state.take() {
                        None => false,
                        Some(CellPointerState { pos, buttons }) => {
                            if buttons == MouseButtons::LEFT {
                                log::debug!("flip cell: {:?}", pos);
                                self.flip_cell(pos);
                            }
                            true
                        }
                    }
                } else {
                    // re-render only when the position or the left-button
                    // state changed, rapid pointer noise stays cheap
                    match self.current_cell_state.replace(cell_state) {
                        None => true,
                        Some(CellPointerState { pos, buttons }) => {
                            (pos != cell_state.pos)
                                || ((buttons & MouseButtons::LEFT)
                                    != (cell_state.buttons & MouseButtons::LEFT))
                        }
                    }
                }
            }
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.seed = js_random_seed();
                self.game = Self::new_session(&self.settings, self.seed);
                self.current_cell_state = None;
                true
            }
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            UpdateSettings(settings) => {
                if self.settings != settings {
                    self.settings = settings;
                    settings.local_save();
                    true
                } else {
                    false
                }
            }
        };

        if updated {
            self.game.local_save();
        }
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;
        use settings::SettingsView;

        let (cols, rows) = self.get_size();
        let game_state_class = self.get_game_state_class();
        let is_playable = self.is_playable();
        let lit_count = format_for_counter(u32::from(self.game.engine.lit_count()));
        let elapsed_time = format_for_counter(self.get_time());

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_show_settings = ctx.link().callback(|_| ToggleSettings);
        let cb_update_settings = ctx.link().callback(UpdateSettings);
        let cb_close_settings = ctx.link().callback(|_| ToggleSettings);

        // the terminal win view replaces the grid, the two never render together
        let board_or_win = if self.get_game_state().is_finished() {
            html! {
                <div class="win-msg">{"You win!"}</div>
            }
        } else {
            html! {
                <table class={is_playable.then_some("playable")}>
                    {
                        for (0..rows).map(|y| html! {
                            <tr>
                                {
                                    for (0..cols).map(|x| {
                                        let pos = (x, y);
                                        let lit = self.game.engine.cell_at(pos).is_lit();
                                        let pressed = self.is_pressed(pos);
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellView {x} {y} {lit} {callback} {pressed}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            }
        };

        html! {
            <div class="raitsuauto" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <small onclick={cb_show_settings}>{"···"}</small>
                <nav>
                    <aside>{lit_count}</aside>
                    <span><button class={game_state_class} onclick={cb_new_game}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                { board_or_win }
                <SettingsView
                    open={self.settings_open}
                    settings={self.settings}
                    callback={cb_update_settings}
                    on_close={cb_close_settings}
                />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(0).unwrap()
    }

    fn session_with(size: game::Coord2, lit: &[game::Coord2]) -> GameSession {
        let board = game::Board::from_lit_coords(size, lit).unwrap();
        GameSession::new(game::PlayEngine::new(board))
    }

    #[test]
    fn winning_press_is_reflected_in_view_state() {
        let mut session = session_with((3, 3), &[(0, 0), (1, 0), (0, 1)]);
        assert_eq!(session.view_state(), ViewGameState::Active);

        assert_eq!(session.engine.flip((0, 0)), Ok(game::FlipOutcome::Won));
        session.on_successful_move(t0());

        assert_eq!(session.view_state(), ViewGameState::Won);
        assert_eq!(session.move_count, 1);
        assert_eq!(session.ended_at, Some(t0()));
    }

    #[test]
    fn board_that_starts_cleared_is_won_at_start() {
        let session = session_with((2, 2), &[]);

        assert_eq!(session.view_state(), ViewGameState::WonAtStart);
        assert!(session.view_state().is_finished());
    }

    #[test]
    fn post_win_input_is_not_an_update() {
        let mut session = session_with((3, 3), &[(0, 0), (1, 0), (0, 1)]);
        session.engine.flip((0, 0)).unwrap();
        session.on_successful_move(t0());

        assert!(!session.engine.flip((1, 1)).has_update());
        assert_eq!(session.move_count, 1);
    }

    #[test]
    fn first_move_sets_the_start_timestamp_once() {
        let mut session = session_with((3, 3), &[(1, 1)]);
        let later = DateTime::<Utc>::from_timestamp_millis(5_000).unwrap();

        session.engine.flip((0, 0)).unwrap();
        session.on_successful_move(t0());
        session.engine.flip((2, 2)).unwrap();
        session.on_successful_move(later);

        assert_eq!(session.started_at, Some(t0()));
        assert_eq!(session.elapsed_secs(later), 5);
    }

    #[test]
    fn elapsed_time_freezes_at_the_winning_move() {
        let mut session = session_with((3, 3), &[(0, 0), (1, 0), (0, 1)]);
        let won_at = DateTime::<Utc>::from_timestamp_millis(3_000).unwrap();
        let later = DateTime::<Utc>::from_timestamp_millis(60_000).unwrap();

        session.started_at = Some(t0());
        session.engine.flip((0, 0)).unwrap();
        session.on_successful_move(won_at);

        assert_eq!(session.elapsed_secs(later), 3);
    }

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(<GameSession as StorageKey>::KEY, "raitsuauto:game");
    }
}
