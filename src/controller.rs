// Like indicator controller - fetch status, render the star, toggle on click
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::client::LikesApi;
use crate::config::ToggleConfig;
use crate::indicator::IndicatorHandle;
use crate::models::{EntityId, IndicatorState, LikeAction, LikeStatus};
use crate::{debug_info, v_info, LikeResult};

/// What a click ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A toggle request went out; `status` is what the icon now shows.
    Sent { action: LikeAction, status: LikeStatus },
    /// Another toggle was still in flight, nothing was sent.
    Busy,
}

#[derive(Debug, Default)]
struct ControllerState {
    entity_id: Option<EntityId>,
    /// Status fetched by `initialize`.
    loaded_status: LikeStatus,
    /// Status as last confirmed by the API.
    status: LikeStatus,
    in_flight: bool,
    /// Bumped by every `initialize`; toggles started under an older
    /// generation never commit.
    generation: u64,
}

pub struct LikeIndicatorController<I: IndicatorHandle> {
    api: Arc<dyn LikesApi>,
    icon: Mutex<I>,
    state: Mutex<ControllerState>,
    toggle: ToggleConfig,
}

impl<I: IndicatorHandle> LikeIndicatorController<I> {
    pub fn new(api: Arc<dyn LikesApi>, icon: I, toggle: ToggleConfig) -> Self {
        Self {
            api,
            icon: Mutex::new(icon),
            state: Mutex::new(ControllerState::default()),
            toggle,
        }
    }

    /// Reads the cafe id off `page_url`, fetches whether the user likes it,
    /// renders the star and arms click handling.
    pub async fn initialize(&self, page_url: &str) -> LikeResult<LikeStatus> {
        let entity_id = EntityId::from_page_url(page_url);
        debug_info!("initialize: page {} -> cafe {}", page_url, entity_id);

        let likes = self.api.fetch_like_status(&entity_id).await?;

        let mut state = self.state();
        self.render(IndicatorState::from_status(likes));
        v_info!("⭐ Cafe {}: {}", entity_id, if likes { "liked" } else { "not liked" });
        state.entity_id = Some(entity_id);
        state.loaded_status = likes;
        state.status = likes;
        state.in_flight = false;
        state.generation += 1;

        Ok(likes)
    }

    /// Handles one click on the star.
    pub async fn click(&self) -> LikeResult<ClickOutcome> {
        if self.toggle.track_state {
            self.click_tracked().await
        } else {
            self.click_load_time().await
        }
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.state().entity_id.clone()
    }

    pub fn status(&self) -> LikeStatus {
        self.state().status
    }

    pub fn indicator_state(&self) -> Option<IndicatorState> {
        self.icon().state()
    }

    pub fn icon(&self) -> MutexGuard<'_, I> {
        self.icon.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn render(&self, indicator: IndicatorState) {
        self.icon().set_state(indicator);
    }

    // Always sends the action picked at load time and never touches the icon.
    async fn click_load_time(&self) -> LikeResult<ClickOutcome> {
        let (entity_id, loaded) = {
            let state = self.state();
            let entity_id = state.entity_id.clone().ok_or("Like indicator not initialized")?;
            (entity_id, state.loaded_status)
        };

        let action = LikeAction::for_status(loaded);
        let code = self.api.send_toggle(action, &entity_id).await?;
        debug_info!("click: {} cafe {} -> HTTP {} (ignored)", action, entity_id, code);

        Ok(ClickOutcome::Sent { action, status: loaded })
    }

    // Flips the icon up front, commits on 2xx and reverts otherwise.
    // State is locked before the icon wherever both are held.
    async fn click_tracked(&self) -> LikeResult<ClickOutcome> {
        let (entity_id, previous, generation) = {
            let mut state = self.state();
            let entity_id = state.entity_id.clone().ok_or("Like indicator not initialized")?;
            if state.in_flight {
                debug_info!("click: toggle already in flight for cafe {}", entity_id);
                return Ok(ClickOutcome::Busy);
            }
            state.in_flight = true;
            self.render(IndicatorState::from_status(state.status).flipped());
            (entity_id, state.status, state.generation)
        };

        let action = LikeAction::for_status(previous);
        let next = action.resulting_status();

        let result = self.api.send_toggle(action, &entity_id).await;

        let mut state = self.state();
        if state.generation != generation {
            // re-initialized while the request was out; the fresh status wins
            debug_info!("click: dropping {} result for cafe {} from a previous load", action, entity_id);
            result?;
            return Ok(ClickOutcome::Sent { action, status: state.status });
        }

        state.in_flight = false;
        match result {
            Ok(code) if (200..300).contains(&code) => {
                state.status = next;
                v_info!("⭐ {} cafe {} (HTTP {})", action, entity_id, code);
                Ok(ClickOutcome::Sent { action, status: next })
            }
            Ok(code) => {
                self.render(IndicatorState::from_status(previous));
                Err(format!("{} request for cafe {} failed with status {}", action, entity_id, code).into())
            }
            Err(e) => {
                self.render(IndicatorState::from_status(previous));
                Err(e)
            }
        }
    }
}

impl<I: IndicatorHandle + 'static> LikeIndicatorController<I> {
    /// Runs a click as its own task, the way a UI event handler would.
    pub fn spawn_click(self: &Arc<Self>) -> JoinHandle<LikeResult<ClickOutcome>> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.click().await })
    }
}
