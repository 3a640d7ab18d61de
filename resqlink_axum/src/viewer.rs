//! Hotspot viewer endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use resqlink::{HotspotId, HotspotState, HotspotViewer, RQL_X1_HOTSPOTS, Vec3};

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HotspotView {
    pub id: HotspotId,
    pub label: &'static str,
    pub description: &'static str,
    pub state: HotspotState,
    pub tooltip_visible: bool,
    pub anchor: Vec3,
}

#[derive(Debug, Serialize)]
pub struct ViewerView {
    pub rotating: bool,
    pub rotation: f32,
    pub hovered: Option<HotspotId>,
    pub selected: Option<HotspotId>,
    pub hotspots: Vec<HotspotView>,
}

impl ViewerView {
    fn new(viewer: &HotspotViewer, exploded: bool) -> Self {
        let hotspots = RQL_X1_HOTSPOTS
            .iter()
            .map(|annotation| HotspotView {
                id: annotation.id,
                label: annotation.label,
                description: annotation.description,
                state: viewer.state_of(annotation.id),
                tooltip_visible: viewer.tooltip_visible(annotation.id),
                anchor: annotation.anchor(exploded),
            })
            .collect();
        Self {
            rotating: viewer.is_rotating(),
            rotation: viewer.rotation(),
            hovered: viewer.hovered(),
            selected: viewer.selected(),
            hotspots,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub exploded: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotAction {
    Enter,
    Leave,
    Click,
    Close,
}

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/viewer", get(get_viewer))
        .route("/viewer/hotspots/{id}/{action}", post(hotspot_event))
        .route("/viewer/background", post(background))
        .route("/viewer/tick", post(tick))
        .route("/viewer/unmount", post(unmount))
}

async fn get_viewer(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Json<ViewerView> {
    let viewer = state.viewer.lock().await;
    Json(ViewerView::new(&viewer, query.exploded))
}

async fn hotspot_event(
    State(state): State<AppState>,
    Path((id, action)): Path<(HotspotId, HotspotAction)>,
    Query(query): Query<ViewQuery>,
) -> Json<ViewerView> {
    let mut viewer = state.viewer.lock().await;
    match action {
        HotspotAction::Enter => viewer.pointer_enter(id),
        HotspotAction::Leave => viewer.pointer_leave(id),
        HotspotAction::Click => viewer.click(id),
        HotspotAction::Close => viewer.close(id),
    }
    Json(ViewerView::new(&viewer, query.exploded))
}

async fn background(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Json<ViewerView> {
    let mut viewer = state.viewer.lock().await;
    viewer.click_background();
    Json(ViewerView::new(&viewer, query.exploded))
}

async fn tick(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Json<ViewerView> {
    let mut viewer = state.viewer.lock().await;
    viewer.tick();
    Json(ViewerView::new(&viewer, query.exploded))
}

async fn unmount(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Json<ViewerView> {
    let mut viewer = state.viewer.lock().await;
    viewer.unmount();
    Json(ViewerView::new(&viewer, query.exploded))
}
