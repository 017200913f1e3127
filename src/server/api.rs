//! HTTP API
//!
//! Mock REST endpoints over the progression engine. Handlers are thin: they
//! validate the request, call into the library and shape the JSON.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::data::{
    join_event, list_events, DataManager, EventDescriptor, EventFilter, EventRepository,
    EventSummary, InMemoryEventRepository,
};
use crate::dungeon::{assemble_team, complete_challenge, DungeonChallenge, DungeonRun, Phase, TeamMember};
use crate::error::ApiError;
use crate::profile::{AvatarUpdate, LootRecord, ProfileStore, ProfileUpdate, UserProfile, XpRecord};
use crate::progression::{
    achievements_for, level_title, progress_percent, scaled_xp, Eligibility, EventKind, StatType,
    Stats,
};
use crate::rewards::{roll_dungeon_rewards, Difficulty, LootPools, LootRoll, MAX_TEAM_SIZE, MIN_TEAM_SIZE};

/// Largest XP amount a single `gain_xp` request may carry
pub const MAX_XP_GRANT: i64 = 1000;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<ProfileStore>,
    pub events: Arc<dyn EventRepository>,
    pub challenges: Arc<Vec<DungeonChallenge>>,
    pub loot_pools: Arc<LootPools>,
    pub rng: Arc<Mutex<StdRng>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Fresh state over loaded reference data. Seeds the RNG from the
    /// config when a seed is set.
    pub fn new(config: Config, data: DataManager) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            profiles: Arc::new(ProfileStore::default()),
            events: Arc::new(InMemoryEventRepository::new(data.events)),
            challenges: Arc::new(data.challenges),
            loot_pools: Arc::new(data.loot_pools),
            rng: Arc::new(Mutex::new(rng)),
            config: Arc::new(config),
        }
    }

    fn challenge(&self, id: &str) -> Option<&DungeonChallenge> {
        self.challenges.iter().find(|c| c.id == id)
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/events", get(get_events).post(post_join))
        .route("/xp", get(get_xp).post(post_xp))
        .route("/profile", get(get_profile).patch(patch_profile))
        .route("/profile/avatar", patch(patch_avatar))
        .route("/profile/reset", post(post_reset))
        .route("/dungeons", get(get_dungeons))
        .route("/dungeons/:id/complete", post(post_complete_dungeon))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    log::info!("Starting HTTP API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Configured artificial delay, applied before any state is touched
async fn simulate_latency(state: &AppState) {
    if !state.config.latency.is_zero() {
        tokio::time::sleep(state.config.latency).await;
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct EventQuery {
    category: Option<String>,
    difficulty: Option<String>,
    premium: Option<String>,
}

#[derive(Serialize)]
struct EventsResponse {
    success: bool,
    events: Vec<EventDescriptor>,
    total: usize,
}

async fn get_events(
    State(state): State<AppState>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> Result<Json<EventsResponse>, ApiError> {
    let Query(query) = query?;
    simulate_latency(&state).await;

    let filter = EventFilter::from_query(
        query.category.as_deref(),
        query.difficulty.as_deref(),
        query.premium.as_deref(),
    );
    let events = list_events(state.events.as_ref(), &filter);

    Ok(Json(EventsResponse {
        success: true,
        total: events.len(),
        events,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct JoinRequest {
    event_id: Option<String>,
    user_id: Option<String>,
    user_level: Option<u32>,
    user_stats: Option<Stats>,
}

#[derive(Serialize)]
struct JoinResponse {
    success: bool,
    message: &'static str,
    event: EventSummary,
}

async fn post_join(
    State(state): State<AppState>,
    body: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<Json<JoinResponse>, ApiError> {
    let Json(request) = body?;
    simulate_latency(&state).await;
    join(&state, request).map(Json)
}

fn join(state: &AppState, request: JoinRequest) -> Result<JoinResponse, ApiError> {
    let (Some(event_id), Some(_user_id)) = (required(request.event_id), required(request.user_id)) else {
        return Err(ApiError::validation("Missing required fields: eventId and userId"));
    };

    // Anything the client leaves out comes from the stored profile
    let profile = state.profiles.snapshot();
    let level = request.user_level.unwrap_or(profile.level);
    let stats = request.user_stats.unwrap_or(profile.stats);

    let joined = join_event(state.events.as_ref(), &event_id, level, &stats)?;

    Ok(JoinResponse {
        success: true,
        message: "Successfully joined event",
        event: joined.summary(),
    })
}

// =============================================================================
// XP and loot
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct XpRequest {
    action: Option<String>,
    user_id: Option<String>,
    event_id: Option<String>,
    xp_amount: Option<i64>,
    stat_type: Option<String>,
    event_type: Option<String>,
    challenge_id: Option<String>,
    difficulty: Option<String>,
    team_size: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct XpGainResult {
    xp_gained: u32,
    stat_gained: u32,
    stat_type: Option<StatType>,
    level_up: bool,
    new_level: u32,
    achievements: Vec<String>,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LootResult {
    #[serde(flatten)]
    roll: LootRoll,
    challenge_id: String,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum XpActionResult {
    Gain(XpGainResult),
    Loot(LootResult),
}

#[derive(Serialize)]
struct XpResponse {
    success: bool,
    result: XpActionResult,
}

async fn post_xp(
    State(state): State<AppState>,
    body: Result<Json<XpRequest>, JsonRejection>,
) -> Result<Json<XpResponse>, ApiError> {
    let Json(request) = body?;
    simulate_latency(&state).await;

    let result = match request.action.as_deref() {
        Some("gain_xp") => XpActionResult::Gain(gain_xp(&state, request)?),
        Some("generate_loot") => XpActionResult::Loot(generate_loot(&state, request)?),
        _ => {
            return Err(ApiError::validation(
                r#"Invalid action. Use "gain_xp" or "generate_loot""#,
            ))
        }
    };

    Ok(Json(XpResponse { success: true, result }))
}

fn parse_difficulty(raw: Option<&str>) -> Result<Difficulty, ApiError> {
    match raw {
        None => Ok(Difficulty::default()),
        Some(value) => value
            .parse()
            .map_err(|_| ApiError::validation("Invalid difficulty. Must be normal, hard, or nightmare")),
    }
}

fn gain_xp(state: &AppState, request: XpRequest) -> Result<XpGainResult, ApiError> {
    let (Some(_user_id), Some(amount)) = (required(request.user_id), request.xp_amount) else {
        return Err(ApiError::validation("Missing required fields: userId and xpAmount"));
    };
    if !(0..=MAX_XP_GRANT).contains(&amount) {
        return Err(ApiError::validation("XP amount must be between 0 and 1000"));
    }

    let stat_type = request
        .stat_type
        .as_deref()
        .map(str::parse::<StatType>)
        .transpose()
        .map_err(|_| {
            ApiError::validation("Invalid statType. Must be strength, intelligence, creativity, or charisma")
        })?;

    let kind = match request.event_type.as_deref() {
        None | Some("regular") => EventKind::Regular,
        Some("dungeon") => EventKind::Dungeon(parse_difficulty(request.difficulty.as_deref())?),
        Some(_) => return Err(ApiError::validation(r#"Invalid eventType. Use "regular" or "dungeon""#)),
    };

    let xp = scaled_xp(amount as u32, kind);
    let source = match request.event_id {
        Some(id) => state.events.get(&id).map(|e| e.title).unwrap_or(id),
        None => "XP grant".to_string(),
    };

    let outcome = {
        let mut rng = state.rng.lock();
        state.profiles.add_xp(xp, stat_type, &source, &mut *rng)
    };

    Ok(XpGainResult {
        xp_gained: outcome.xp_gained,
        stat_gained: outcome.stat_gained,
        stat_type: outcome.stat_type,
        level_up: outcome.leveled_up,
        new_level: outcome.new_level(),
        achievements: achievements_for(&outcome),
        timestamp: Utc::now(),
    })
}

fn generate_loot(state: &AppState, request: XpRequest) -> Result<LootResult, ApiError> {
    let (Some(_user_id), Some(challenge_id), Some(difficulty), Some(team_size)) = (
        required(request.user_id),
        required(request.challenge_id),
        request.difficulty,
        request.team_size,
    ) else {
        return Err(ApiError::validation(
            "Missing required fields: userId, challengeId, difficulty, teamSize",
        ));
    };

    let difficulty = parse_difficulty(Some(difficulty.as_str()))?;
    let (min_team, max_team) = (i64::from(MIN_TEAM_SIZE), i64::from(MAX_TEAM_SIZE));
    if !(min_team..=max_team).contains(&team_size) {
        return Err(ApiError::validation("Team size must be between 1 and 12"));
    }

    let roll = {
        let mut rng = state.rng.lock();
        roll_dungeon_rewards(&state.loot_pools, difficulty, team_size as u32, &mut *rng)
    };

    let source = state
        .challenge(&challenge_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| challenge_id.clone());
    for item in &roll.loot {
        state.profiles.add_loot(item, roll.rarity, &source);
    }

    log::info!(
        "Generated {} loot item(s) from {} ({} difficulty, team of {})",
        roll.loot.len(),
        source,
        difficulty,
        team_size
    );

    Ok(LootResult {
        roll,
        challenge_id,
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct HistoryQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum HistoryResponse {
    #[serde(rename_all = "camelCase")]
    Xp {
        success: bool,
        xp_history: Vec<XpRecord>,
        #[serde(rename = "totalXP")]
        total_xp: u64,
    },
    #[serde(rename_all = "camelCase")]
    Inventory {
        success: bool,
        inventory: Vec<LootRecord>,
        total_items: usize,
    },
}

async fn get_xp(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(query) = query?;
    simulate_latency(&state).await;

    if required(query.user_id).is_none() {
        return Err(ApiError::validation("Missing userId parameter"));
    }

    match query.kind.as_deref() {
        Some("xp_history") => {
            let xp_history = state.profiles.xp_history();
            let total_xp = xp_history.iter().map(|r| r.xp_gained as u64).sum();
            Ok(Json(HistoryResponse::Xp { success: true, xp_history, total_xp }))
        }
        Some("inventory") => {
            let inventory = state.profiles.loot_history();
            Ok(Json(HistoryResponse::Inventory {
                success: true,
                total_items: inventory.len(),
                inventory,
            }))
        }
        _ => Err(ApiError::validation(
            r#"Invalid type parameter. Use "xp_history" or "inventory""#,
        )),
    }
}

// =============================================================================
// Profile
// =============================================================================

#[derive(Serialize)]
struct ProfileResponse {
    success: bool,
    profile: UserProfile,
    /// Fill of the level progress bar, may pass 100
    progress: f64,
    title: &'static str,
}

impl ProfileResponse {
    fn new(profile: &UserProfile) -> Self {
        Self {
            success: true,
            progress: progress_percent(profile.xp, profile.xp_to_next_level),
            title: level_title(profile.level),
            profile: profile.clone(),
        }
    }
}

async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    simulate_latency(&state).await;
    Json(ProfileResponse::new(&state.profiles.snapshot()))
}

async fn patch_profile(
    State(state): State<AppState>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Json(update) = body?;
    simulate_latency(&state).await;
    let profile = state.profiles.update_user(&update)?;
    Ok(Json(ProfileResponse::new(&profile)))
}

async fn patch_avatar(
    State(state): State<AppState>,
    body: Result<Json<AvatarUpdate>, JsonRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Json(update) = body?;
    simulate_latency(&state).await;
    let profile = state.profiles.update_avatar(&update);
    Ok(Json(ProfileResponse::new(&profile)))
}

async fn post_reset(State(state): State<AppState>) -> Json<ProfileResponse> {
    simulate_latency(&state).await;
    state.profiles.reset();
    log::info!("Profile reset");
    Json(ProfileResponse::new(&state.profiles.snapshot()))
}

// =============================================================================
// Dungeons
// =============================================================================

#[derive(Serialize)]
struct DungeonListing {
    #[serde(flatten)]
    challenge: DungeonChallenge,
    eligibility: Eligibility,
}

#[derive(Serialize)]
struct DungeonsResponse {
    success: bool,
    challenges: Vec<DungeonListing>,
}

async fn get_dungeons(State(state): State<AppState>) -> Json<DungeonsResponse> {
    simulate_latency(&state).await;

    let profile = state.profiles.snapshot();
    let challenges = state
        .challenges
        .iter()
        .map(|challenge| DungeonListing {
            eligibility: challenge.eligibility(&profile),
            challenge: challenge.clone(),
        })
        .collect();

    Json(DungeonsResponse { success: true, challenges })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionResponse {
    success: bool,
    challenge_id: String,
    team: Vec<TeamMember>,
    phases: Vec<Phase>,
    xp_gained: u32,
    level_up: bool,
    new_level: u32,
    item: Option<String>,
    achievements: Vec<String>,
    timestamp: DateTime<Utc>,
}

async fn post_complete_dungeon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CompletionResponse>, ApiError> {
    simulate_latency(&state).await;
    complete_dungeon(&state, &id).map(Json)
}

fn complete_dungeon(state: &AppState, id: &str) -> Result<CompletionResponse, ApiError> {
    let challenge = state
        .challenge(id)
        .ok_or_else(|| ApiError::NotFound("Challenge not found".to_string()))?;

    let player = state.profiles.snapshot();
    let eligibility = challenge.eligibility(&player);
    if !eligibility.allowed {
        log::info!("Dungeon {} refused: {}", challenge.name, eligibility.reason);
        return Err(ApiError::Rejected(eligibility.reason));
    }

    let mut run = DungeonRun::new();
    let mut phases = run.fast_forward();
    run.complete()?;
    phases.push(run.phase());

    let (team, completion) = {
        let mut rng = state.rng.lock();
        let team = assemble_team(challenge, &player, &mut *rng);
        let completion = complete_challenge(&state.profiles, challenge, &mut *rng);
        (team, completion)
    };

    Ok(CompletionResponse {
        success: true,
        challenge_id: challenge.id.clone(),
        team,
        phases,
        xp_gained: completion.xp.xp_gained,
        level_up: completion.xp.leveled_up,
        new_level: completion.xp.new_level(),
        achievements: achievements_for(&completion.xp),
        item: completion.item,
        timestamp: Utc::now(),
    })
}
