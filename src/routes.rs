use crate::{api::requests, auth::handlers, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // POST /login
    cfg.service(
        web::resource("/login")
            .wrap(build_limiter(config.rate_login_per_min))
            .route(web::post().to(handlers::login)),
    );

    // GET /requests, POST /requests, PATCH /requests/{id}
    cfg.service(
        web::scope("/requests")
            .wrap(build_limiter(config.rate_requests_per_min))
            .service(
                web::resource("")
                    .route(web::get().to(requests::list_requests))
                    .route(web::post().to(requests::create_request)),
            )
            .service(web::resource("/{id}").route(web::patch().to(requests::update_status))),
    );
}
