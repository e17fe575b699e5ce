//! Application store: game lifecycle, interaction, and recovery policy.
//!
//! An explicit state object replacing the original client's reactive
//! observable store. UI layers are external subscribers: they read
//! snapshots through the accessor methods and feed interactions into
//! [`GameStore::handle_cell`]. All mutation happens here and in the
//! selection machine; the server's replies are the only source of game
//! truth.
//!
//! State lives behind an `Arc<Mutex<_>>` so that delayed reconciliation
//! steps, fresh loads, and interactions interleave safely on the runtime's
//! single logical thread. Locks are never held across an await.

use crate::error::{RecoveryAction, ServiceError};
use crate::model::{Game, GamesOverview, Move, Point};
use crate::selection::SelectionState;
use crate::sequencer::{self, ReplayEpoch, ReplayTiming};
use crate::service::GameService;
use crate::session::{SessionState, SessionStore};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Which page the embedding application should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// No valid session; the player must authenticate.
    LoginPage,
    /// Logged in with no game selected.
    ListGamesPage,
    /// A game is loaded and playable.
    PlayGamePage,
}

#[derive(Debug, Default)]
struct StoreState {
    session_initialized: bool,
    logged_in: bool,
    api_error: Option<String>,
    loading_count: u32,
    games_overview: GamesOverview,
    game: Option<Game>,
    selection: SelectionState,
}

/// The client-side interaction engine.
///
/// Cheap to clone; clones share state, so a replay task spawned from one
/// handle observes loads performed through another.
#[derive(Clone)]
pub struct GameStore {
    service: Arc<dyn GameService>,
    session: SessionStore,
    timing: ReplayTiming,
    epoch: ReplayEpoch,
    state: Arc<Mutex<StoreState>>,
}

impl GameStore {
    /// Creates a store over the given service and session provider.
    pub fn new(service: Arc<dyn GameService>, session: SessionStore) -> Self {
        Self {
            service,
            session,
            timing: ReplayTiming::default(),
            epoch: ReplayEpoch::new(),
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    /// Overrides the reconciliation replay delays.
    pub fn with_timing(mut self, timing: ReplayTiming) -> Self {
        self.timing = timing;
        self
    }

    // ----- snapshot accessors -------------------------------------------

    /// Current navigation state.
    pub fn nav_state(&self) -> NavState {
        let st = self.state.lock().unwrap();
        if !st.logged_in {
            NavState::LoginPage
        } else if st.game.is_some() {
            NavState::PlayGamePage
        } else {
            NavState::ListGamesPage
        }
    }

    /// True once [`GameStore::initialize_session`] has run.
    pub fn session_initialized(&self) -> bool {
        self.state.lock().unwrap().session_initialized
    }

    /// True if credentials are present.
    pub fn logged_in(&self) -> bool {
        self.state.lock().unwrap().logged_in
    }

    /// True if a game is currently loaded.
    pub fn game_in_progress(&self) -> bool {
        self.state.lock().unwrap().game.is_some()
    }

    /// True while any round trip is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading_count > 0
    }

    /// The last surfaced error, if any.
    pub fn api_error(&self) -> Option<String> {
        self.state.lock().unwrap().api_error.clone()
    }

    /// Snapshot of the current game, if one is loaded.
    pub fn game(&self) -> Option<Game> {
        self.state.lock().unwrap().game.clone()
    }

    /// Snapshot of the games overview.
    pub fn games_overview(&self) -> GamesOverview {
        self.state.lock().unwrap().games_overview.clone()
    }

    /// Snapshot of the selection state.
    pub fn selection(&self) -> SelectionState {
        self.state.lock().unwrap().selection.clone()
    }

    /// Clears the surfaced error.
    pub fn clear_error(&self) {
        self.state.lock().unwrap().api_error = None;
    }

    // ----- session lifecycle --------------------------------------------

    /// Adopts whatever session the provider already holds.
    #[instrument(skip(self))]
    pub fn initialize_session(&self) {
        let logged_in = self.session.get().is_some();
        let mut st = self.state.lock().unwrap();
        st.session_initialized = true;
        st.logged_in = logged_in;
        info!(logged_in, "session initialized");
    }

    /// Stores freshly acquired credentials. Token acquisition itself is the
    /// embedding application's concern.
    #[instrument(skip(self, session), fields(player = %session.player_name))]
    pub fn login(&self, session: SessionState) {
        self.session.update(session);
        self.state.lock().unwrap().logged_in = true;
    }

    /// Drops the session and returns to the login page.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.session.clear();
        self.epoch.bump();
        let mut st = self.state.lock().unwrap();
        st.logged_in = false;
        st.game = None;
        st.selection.clear();
    }

    // ----- game lifecycle -----------------------------------------------

    /// Loads the games overview and resumes the session's game, if any.
    #[instrument(skip(self))]
    pub async fn initialize_game_app(&self) {
        self.begin_op();
        if let Err(e) = self.sync_app().await {
            self.recover(e).await;
        }
        self.end_op();
    }

    /// Loads and enters the given game.
    #[instrument(skip(self))]
    pub async fn play_game(&self, id: &str) {
        self.begin_op();
        match self.service.load_game(id).await {
            Ok(Some(game)) => self.install_game(game),
            // Vanished between listing and loading; same recovery as a 404.
            Ok(None) => self.recover(ServiceError::NotFound).await,
            Err(e) => self.recover(e).await,
        }
        self.end_op();
    }

    /// Creates a new game and enters it.
    #[instrument(skip(self))]
    pub async fn start_game(&self) {
        self.begin_op();
        match self.service.create_game().await {
            Ok(game) => self.install_game(game),
            Err(e) => self.recover(e).await,
        }
        self.end_op();
    }

    /// Deletes the current game and returns to the overview.
    #[instrument(skip(self))]
    pub async fn end_game(&self) {
        let Some(id) = self.current_game_id() else {
            return;
        };
        self.begin_op();
        let result: Result<(), ServiceError> = async {
            self.service.delete_game(&id).await?;
            self.clear_game();
            let overview = self.service.list_games().await?;
            self.state.lock().unwrap().games_overview = overview;
            Ok(())
        }
        .await;
        if let Err(e) = result {
            self.recover(e).await;
        }
        self.end_op();
    }

    /// Leaves the current game without deleting it.
    #[instrument(skip(self))]
    pub async fn go_home(&self) {
        self.begin_op();
        self.clear_game();
        match self.service.list_games().await {
            Ok(overview) => self.state.lock().unwrap().games_overview = overview,
            Err(e) => self.recover(e).await,
        }
        self.end_op();
    }

    // ----- interaction --------------------------------------------------

    /// Feeds a board-cell interaction into the selection machine and
    /// submits a move when one is completed.
    #[instrument(skip(self))]
    pub async fn handle_cell(&self, p: Point) {
        let submission = {
            let mut st = self.state.lock().unwrap();
            let st = &mut *st;
            match st.game.as_ref() {
                Some(game) => st.selection.on_cell(game, p),
                None => None,
            }
        };

        if let Some(mv) = submission {
            self.begin_op();
            self.submit(mv).await;
            self.end_op();
        }
    }

    async fn submit(&self, mv: Move) {
        let Some(id) = self.current_game_id() else {
            self.state.lock().unwrap().selection.clear();
            return;
        };

        // Key the whole reconciliation to the load this move was computed
        // against; a fresh load during the round trip invalidates it.
        let epoch = self.epoch.current();

        match self.service.submit_move(&id, mv).await {
            Ok(confirmed) => self.reconcile(confirmed, epoch).await,
            Err(e) => {
                self.state.lock().unwrap().selection.clear();
                self.recover(e).await;
            }
        }
    }

    /// Replays the confirmed move history, then commits the authoritative
    /// game. See the [`sequencer`](crate::sequencer) module docs.
    ///
    /// `epoch` is the load the submitted move belonged to; if a fresh load
    /// superseded it at any point (including during the submit round trip),
    /// the entire reconciliation is dropped, optimistic half-step included.
    async fn reconcile(&self, confirmed: Game, epoch: u64) {
        let steps = sequencer::replay_plan(&confirmed, &self.timing);

        // Optimistic half-step: the turn is spent and the selection is done
        // before any of the server's history is shown.
        {
            let mut st = self.state.lock().unwrap();
            if self.epoch.current() != epoch {
                debug!("submission superseded by a fresh load; dropping reconciliation");
                return;
            }
            st.selection.clear();
            if let Some(game) = st.game.as_mut() {
                game.is_player_turn = false;
            }
        }

        for step in steps {
            tokio::time::sleep(step.delay).await;
            let mut st = self.state.lock().unwrap();
            if self.epoch.current() != epoch {
                debug!("replay superseded by a fresh load; dropping remaining steps");
                return;
            }
            if let Some(game) = st.game.as_mut() {
                sequencer::apply_step(&mut game.tokens, step.from, step.to);
            }
        }

        let mut st = self.state.lock().unwrap();
        if self.epoch.current() == epoch {
            debug!(version = confirmed.version, "committing authoritative game");
            st.game = Some(confirmed);
        }
    }

    // ----- recovery policy ----------------------------------------------

    /// Applies the conflict/session recovery policy to a failed round trip.
    ///
    /// Recovery failures are surfaced rather than retried; every path ends
    /// with an idle selection and a consistent game.
    async fn recover(&self, err: ServiceError) {
        let action = err.recovery();
        warn!(%err, ?action, "recovering from service error");
        match action {
            RecoveryAction::ClearSession => {
                self.session.clear();
                self.epoch.bump();
                let mut st = self.state.lock().unwrap();
                st.logged_in = false;
                st.game = None;
                st.selection.clear();
            }
            RecoveryAction::ReinitializeApp => {
                if let Err(e) = self.sync_app().await {
                    self.surface(e);
                }
            }
            RecoveryAction::ReloadGame => {
                if let Err(e) = self.resync_game().await {
                    self.surface(e);
                }
            }
            RecoveryAction::Surface => self.surface(err),
        }
    }

    fn surface(&self, err: ServiceError) {
        self.state.lock().unwrap().api_error = Some(err.to_string());
    }

    /// Refreshes the overview and re-enters the session's game. Errors
    /// propagate to the caller, which decides whether to recover or
    /// surface them.
    async fn sync_app(&self) -> Result<(), ServiceError> {
        let overview = self.service.list_games().await?;
        self.state.lock().unwrap().games_overview = overview;

        let game_id = self.session.get().and_then(|s| s.game_id);
        if let Some(id) = game_id {
            match self.service.load_game(&id).await? {
                Some(game) => self.install_game(game),
                None => self.clear_game(),
            }
        }
        Ok(())
    }

    /// Reloads the current game after a stale read.
    async fn resync_game(&self) -> Result<(), ServiceError> {
        let Some(id) = self.current_game_id() else {
            return Ok(());
        };
        match self.service.load_game(&id).await? {
            Some(game) => {
                self.install_game(game);
                Ok(())
            }
            None => self.sync_app().await,
        }
    }

    // ----- internals ----------------------------------------------------

    fn current_game_id(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .game
            .as_ref()
            .map(|g| g.game_id.clone())
    }

    /// Makes `game` the current game. Bumping the epoch here invalidates
    /// any replay steps belonging to the superseded load.
    fn install_game(&self, game: Game) {
        self.epoch.bump();
        self.session.set_game_id(Some(game.game_id.clone()));
        let mut st = self.state.lock().unwrap();
        st.selection.clear();
        st.game = Some(game);
    }

    fn clear_game(&self) {
        self.epoch.bump();
        self.session.set_game_id(None);
        let mut st = self.state.lock().unwrap();
        st.selection.clear();
        st.game = None;
    }

    fn begin_op(&self) {
        let mut st = self.state.lock().unwrap();
        st.api_error = None;
        st.loading_count += 1;
    }

    fn end_op(&self) {
        let mut st = self.state.lock().unwrap();
        st.loading_count -= 1;
    }
}
