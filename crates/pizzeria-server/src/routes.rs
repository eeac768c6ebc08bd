//! Route table
//!
//! | Method | Path              | Handler         |
//! |--------|-------------------|-----------------|
//! | GET    | `/products`       | `list_products` |
//! | GET    | `/products/{id}`  | `get_product`   |
//! | GET    | `/cart`           | `get_cart`      |
//! | POST   | `/cart`           | `update_cart`   |
//! | GET    | `/rules`          | `list_rules`    |
//! | POST   | `/rules`          | `add_rule`      |
//! | POST   | `/rules/run`      | `run_rules`     |
//! | DELETE | `/rules/{name}`   | `delete_rule`   |
//! | GET    | `/health`         | `health`        |

use crate::cookie::SESSION_COOKIE;
use crate::error::handle_rejection;
use crate::handlers;
use crate::state::AppState;
use std::convert::Infallible;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Largest accepted request body
const BODY_LIMIT: u64 = 16 * 1024;

/// All routes, with rejections rendered as JSON errors
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    products(state.clone())
        .or(cart(state.clone()))
        .unify()
        .or(rules(state))
        .unify()
        .or(health())
        .unify()
        .with(warp::trace::request())
        .recover(handle_rejection)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn session_cookie() -> impl Filter<Extract = (Option<String>,), Error = Infallible> + Clone {
    warp::cookie::optional(SESSION_COOKIE)
}

fn products(state: AppState) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let list = warp::path!("products")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::list_products);

    let one = warp::path!("products" / String)
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::get_product);

    list.or(one).unify()
}

fn cart(state: AppState) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let view = warp::path!("cart")
        .and(warp::get())
        .and(session_cookie())
        .and(with_state(state.clone()))
        .and_then(handlers::get_cart);

    let update = warp::path!("cart")
        .and(warp::post())
        .and(session_cookie())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::form())
        .and(with_state(state))
        .and_then(handlers::update_cart);

    view.or(update).unify()
}

fn rules(state: AppState) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let list = warp::path!("rules")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::list_rules);

    let add = warp::path!("rules")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::add_rule);

    let run = warp::path!("rules" / "run")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::run_rules);

    let delete = warp::path!("rules" / String)
        .and(warp::delete())
        .and(with_state(state))
        .and_then(handlers::delete_rule);

    list.or(add).unify().or(run).unify().or(delete).unify()
}

fn health() -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("health").and(warp::get()).and_then(handlers::health)
}
