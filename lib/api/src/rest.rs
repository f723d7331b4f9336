use actix_web::{error, web, App, HttpResponse, HttpServer, Result as ActixResult};
use kinship_core::{Artwork, ArtworkId, Error, ExistingPairs, FeatureVector, Gallery, DEFAULT_KINSHIP_LIMIT};
use kinship_similarity::{FileQuery, FileSimilarityRanker, KinshipBuilder, Settings};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Approved artworks considered by a file-similarity search
pub const FILE_SEARCH_POOL_LIMIT: usize = 200;

/// Shared state behind every handler
pub struct ApiState {
    gallery: Arc<Gallery>,
    builder: KinshipBuilder,
    ranker: FileSimilarityRanker,
}

impl ApiState {
    pub fn new(gallery: Arc<Gallery>, settings: Settings) -> kinship_core::Result<Self> {
        Ok(Self {
            gallery,
            builder: KinshipBuilder::new(settings.kinship)?,
            ranker: FileSimilarityRanker::new(settings.ranking)?,
        })
    }

    pub fn gallery(&self) -> &Arc<Gallery> {
        &self.gallery
    }
}

#[derive(Deserialize)]
struct UpsertArtworksRequest {
    artworks: Vec<Artwork>,
}

#[derive(Deserialize)]
struct ComputeKinshipRequest {
    source: Artwork,
    #[serde(default)]
    pool: Vec<Artwork>,
    #[serde(default)]
    existing_pairs: Vec<(ArtworkId, ArtworkId)>,
}

#[derive(Deserialize)]
struct SimilarFileRequest {
    file_name: Option<String>,
    file_type: Option<String>,
    features: Option<FeatureVector>,
}

#[derive(Deserialize)]
struct RankRequest {
    #[serde(default)]
    query: FileQuery,
    #[serde(default)]
    pool: Vec<Artwork>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<ApiState>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register every route; shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(16 * 1024 * 1024)
        .error_handler(|err, _req| {
            let body = serde_json::json!({ "error": err.to_string() });
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health))
        .route("/artworks", web::put().to(upsert_artworks))
        .route("/artworks/{id}", web::get().to(get_artwork))
        .route("/kinship/compute", web::post().to(compute_kinship))
        .route("/kinship/calculate/{id}", web::post().to(calculate_kinship))
        .route("/kinship/{id}", web::get().to(list_kinship))
        .route("/search/similar", web::post().to(search_similar))
        .route("/search/rank", web::post().to(rank_pool));
}

fn parse_id(raw: &str) -> ArtworkId {
    match raw.parse::<ArtworkId>() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

fn artwork_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Artwork not found"
    }))
}

async fn health(state: web::Data<Arc<ApiState>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "artworks": state.gallery.len(),
        "relationships": state.gallery.relationship_count(),
    })))
}

async fn upsert_artworks(
    state: web::Data<Arc<ApiState>>,
    req: web::Json<UpsertArtworksRequest>,
) -> ActixResult<HttpResponse> {
    let count = state.gallery.upsert_batch(req.into_inner().artworks);
    info!(count, "artworks upserted");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": true,
        "count": count,
    })))
}

async fn get_artwork(
    state: web::Data<Arc<ApiState>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = parse_id(&path.into_inner());

    match state.gallery.get(&id) {
        Some(artwork) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": artwork
        }))),
        None => Ok(artwork_not_found()),
    }
}

/// Score a stored artwork against the approved gallery and store new kinship
async fn calculate_kinship(
    state: web::Data<Arc<ApiState>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = parse_id(&path.into_inner());

    let artworks = state.gallery.artworks();
    let existing = state.gallery.existing_pairs();
    let outcome = match state.builder.compute_for(&id, &artworks, &existing) {
        Ok(outcome) => outcome,
        Err(Error::ArtworkNotFound(_)) => {
            warn!(%id, "kinship requested for unknown artwork");
            return Ok(artwork_not_found());
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })));
        }
    };

    if outcome.compared == 0 {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "No other artworks to compare",
            "kinship_created": 0,
        })));
    }

    let proposed = outcome.kinship_created();
    let inserted = state.gallery.insert_relationships(outcome.created);

    info!(
        %id,
        method = %outcome.method,
        compared = outcome.compared,
        proposed,
        inserted,
        "kinship calculated"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "artwork_id": outcome.artwork_id,
        "kinship_created": inserted,
        "method": outcome.method,
        "compared": outcome.compared,
    })))
}

async fn list_kinship(
    state: web::Data<Arc<ApiState>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = parse_id(&path.into_inner());
    let records = state.gallery.kinship_for(&id, DEFAULT_KINSHIP_LIMIT);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": records
    })))
}

/// Stateless kinship over caller-supplied data
async fn compute_kinship(
    state: web::Data<Arc<ApiState>>,
    req: web::Json<ComputeKinshipRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    let existing: ExistingPairs = req.existing_pairs.into_iter().collect();
    let outcome = state.builder.compute(&req.source, &req.pool, &existing);

    Ok(HttpResponse::Ok().json(outcome))
}

/// Rank the approved gallery against an uploaded file
async fn search_similar(
    state: web::Data<Arc<ApiState>>,
    req: web::Json<SimilarFileRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();

    let query = match (req.file_type, req.file_name) {
        (Some(file_type), _) => FileQuery::new(req.features, Some(file_type.to_lowercase())),
        (None, Some(file_name)) => FileQuery::from_file_name(&file_name, req.features),
        (None, None) if req.features.is_some() => FileQuery::new(req.features, None),
        (None, None) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "No file provided"
            })));
        }
    };

    let pool = state.gallery.approved(FILE_SEARCH_POOL_LIMIT);
    let result = state.ranker.rank(&query, &pool);
    info!(pool = pool.len(), hits = result.len(), method = ?result.method, "file similarity search");

    Ok(HttpResponse::Ok().json(result))
}

/// Stateless ranking over a caller-supplied pool
async fn rank_pool(
    state: web::Data<Arc<ApiState>>,
    req: web::Json<RankRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    Ok(HttpResponse::Ok().json(state.ranker.rank(&req.query, &req.pool)))
}
