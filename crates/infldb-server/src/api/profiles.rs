use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use infldb_core::{
    analyze_trends, summarize, CompositeId, MonthlyPerformance, PerformanceSummary, Platform,
    Profile, ProfileFilter, ProfileKey, Trends, DEFAULT_MAX_FOLLOWERS,
};
use infldb_ingest::{load_performance, IngestError};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{normalize_limit, require_snapshot, ApiError, ApiResponse, AppState, ResponseMeta};

const NOT_FOUND_MESSAGE: &str = "profile not found";

#[derive(Debug, Serialize)]
pub(super) struct ProfileItem {
    key: ProfileKey,
    composite_id: Option<CompositeId>,
    #[serde(flatten)]
    profile: Profile,
}

impl From<&Profile> for ProfileItem {
    fn from(profile: &Profile) -> Self {
        Self {
            key: profile.key(),
            composite_id: profile.composite_id(),
            profile: profile.clone(),
        }
    }
}

/// Raw list parameters. Numeric fields stay strings so that a blank form
/// field counts as unset and a malformed one gets the JSON error envelope.
#[derive(Debug, Deserialize)]
pub(super) struct ProfileQuery {
    pub niche: Option<String>,
    pub tags: Option<String>,
    pub location: Option<String>,
    pub min_followers: Option<String>,
    pub max_followers: Option<String>,
    pub platform: Option<String>,
    pub limit: Option<String>,
}

impl ProfileQuery {
    fn to_filter(&self, request_id: &str) -> Result<ProfileFilter, ApiError> {
        Ok(ProfileFilter {
            niche: self.niche.clone().unwrap_or_default(),
            tags: self.tags.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            min_followers: parse_param(request_id, "min_followers", self.min_followers.as_deref())?
                .unwrap_or(0),
            max_followers: parse_param(request_id, "max_followers", self.max_followers.as_deref())?
                .unwrap_or(DEFAULT_MAX_FOLLOWERS),
            platform: self.platform.clone().unwrap_or_default(),
        })
    }

    fn limit(&self, request_id: &str) -> Result<usize, ApiError> {
        parse_param(request_id, "limit", self.limit.as_deref()).map(normalize_limit)
    }
}

/// Parses an optional numeric query parameter; blank means unset.
fn parse_param<T: std::str::FromStr>(
    request_id: &str,
    name: &str,
    raw: Option<&str>,
) -> Result<Option<T>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<T>().map(Some).map_err(|_| {
        ApiError::new(
            request_id,
            "bad_request",
            format!("{name} must be a whole number, got {raw:?}"),
        )
    })
}

/// Raw detail-view parameters. Both stay strings so that a malformed value
/// gets the same 404 as a missing profile.
#[derive(Debug, Deserialize)]
pub(super) struct LookupQuery {
    pub id: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct PerformanceData {
    profile: ProfileItem,
    months: Vec<MonthlyPerformance>,
    summary: Option<PerformanceSummary>,
    trends: Option<Trends>,
}

pub(super) async fn list_profiles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ApiResponse<Vec<ProfileItem>>>, ApiError> {
    let filter = query.to_filter(&req_id.0)?;
    let limit = query.limit(&req_id.0)?;
    let snapshot = require_snapshot(&state, &req_id.0).await?;

    let data = snapshot
        .profiles
        .filter(&filter)
        .into_iter()
        .take(limit)
        .map(ProfileItem::from)
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn lookup_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ApiResponse<ProfileItem>>, ApiError> {
    let snapshot = require_snapshot(&state, &req_id.0).await?;

    let composite = query
        .id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .map(CompositeId);
    let platform = query.platform.as_deref().filter(|p| !p.trim().is_empty());

    let decoded = composite
        .zip(platform)
        .and_then(|(composite, platform)| composite.decode_label(platform));
    let found = decoded.as_ref().and_then(|key| snapshot.profiles.find(key));

    let Some(profile) = found else {
        tracing::warn!(
            id = query.id.as_deref().unwrap_or(""),
            platform = query.platform.as_deref().unwrap_or(""),
            base_id = ?decoded.as_ref().map(|key| key.base_id),
            profiles = snapshot.profiles.len(),
            "detail lookup found no profile"
        );
        return Err(ApiError::new(req_id.0, "not_found", NOT_FOUND_MESSAGE));
    };

    Ok(Json(ApiResponse {
        data: ProfileItem::from(profile),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((platform, base_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ProfileItem>>, ApiError> {
    let snapshot = require_snapshot(&state, &req_id.0).await?;
    let profile = find_by_path(&snapshot.profiles, &platform, &base_id)
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", NOT_FOUND_MESSAGE))?;

    Ok(Json(ApiResponse {
        data: ProfileItem::from(profile),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_performance(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((platform, base_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<PerformanceData>>, ApiError> {
    let snapshot = require_snapshot(&state, &req_id.0).await?;
    let profile = find_by_path(&snapshot.profiles, &platform, &base_id)
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", NOT_FOUND_MESSAGE))?;

    let months = load_performance(
        &state.client,
        &state.performance_dir,
        &profile.platform,
        &profile.name,
    )
    .await
    .map_err(|e| map_performance_error(req_id.0.clone(), &profile.key(), &e))?;

    if months.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            "no performance data for this profile",
        ));
    }

    Ok(Json(ApiResponse {
        data: PerformanceData {
            profile: ProfileItem::from(profile),
            summary: summarize(&months),
            trends: analyze_trends(&months),
            months,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn find_by_path<'a>(
    profiles: &'a infldb_core::ProfileSet,
    platform: &str,
    base_id: &str,
) -> Option<&'a Profile> {
    let base_id = base_id.trim().parse::<u32>().ok()?;
    profiles.find(&ProfileKey::new(Platform::parse(platform), base_id))
}

fn map_performance_error(request_id: String, key: &ProfileKey, error: &IngestError) -> ApiError {
    match error {
        IngestError::NotFound { .. } | IngestError::Io { .. } => {
            tracing::warn!(profile = %key, error = %error, "performance export missing");
            ApiError::new(request_id, "not_found", "no performance data for this profile")
        }
        _ => {
            tracing::error!(profile = %key, error = %error, "performance export failed to load");
            ApiError::new(request_id, "unavailable", "performance data is unavailable")
        }
    }
}
