//! Request handlers
//!
//! Each handler answers with a full [`Response`]; failures are rendered from
//! [`ApiError`] so nothing falls through to other routes.

use crate::error::ApiError;
use crate::state::AppState;
use pizzeria_cart::{CartLine, CartSummary, Session};
use pizzeria_catalog::ProductId;
use pizzeria_rules::Facts;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use warp::http::header::SET_COOKIE;
use warp::http::StatusCode;
use warp::reply::{json, Response};
use warp::{Rejection, Reply};

type HandlerResult = Result<Response, Rejection>;

fn respond(result: Result<Response, ApiError>) -> HandlerResult {
    Ok(result.unwrap_or_else(Reply::into_response))
}

/// Operations accepted by `POST /cart`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit
    IncreaseQuantity,
    /// Remove one unit, never below zero
    DecreaseQuantity,
    /// Delete the product's line
    RemoveFromCart,
    /// Store a voucher code
    ApplyVoucher,
    /// Add `quantity` units (default 1)
    AddToCart,
}

impl CartAction {
    /// Form value naming this action
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::IncreaseQuantity => "increaseQuantity",
            Self::DecreaseQuantity => "decreaseQuantity",
            Self::RemoveFromCart => "removeFromCart",
            Self::ApplyVoucher => "applyVoucher",
            Self::AddToCart => "addToCart",
        }
    }
}

impl FromStr for CartAction {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increaseQuantity" => Ok(Self::IncreaseQuantity),
            "decreaseQuantity" => Ok(Self::DecreaseQuantity),
            "removeFromCart" => Ok(Self::RemoveFromCart),
            "applyVoucher" => Ok(Self::ApplyVoucher),
            "addToCart" => Ok(Self::AddToCart),
            other => Err(ApiError::bad_request(format!("unknown action: {other}"))),
        }
    }
}

/// Form body of `POST /cart`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartForm {
    /// Action name
    pub action: String,
    /// Target product for item actions
    #[serde(default)]
    pub product_id: Option<String>,
    /// Code for `applyVoucher`
    #[serde(default)]
    pub voucher_code: Option<String>,
    /// Units for `addToCart`
    #[serde(default)]
    pub quantity: Option<i32>,
}

impl CartForm {
    fn product_id(&self) -> Result<ProductId, ApiError> {
        self.product_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(ProductId::from)
            .ok_or_else(|| ApiError::bad_request("productId is required"))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView {
    cart_items: Vec<CartLine>,
    voucher_code: String,
    summary: CartSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartUpdated {
    success: bool,
    cart_items: Vec<CartLine>,
    summary: CartSummary,
}

#[derive(Serialize)]
struct Success {
    success: bool,
}

fn with_session(reply: impl Reply, state: &AppState, session: &Session) -> Result<Response, ApiError> {
    let cookie = state.cookies.set_cookie(session)?;
    Ok(warp::reply::with_header(reply, SET_COOKIE, cookie).into_response())
}

/// `GET /products`
pub async fn list_products(state: AppState) -> HandlerResult {
    Ok(json(&state.catalog.find_all()).into_response())
}

/// `GET /products/{id}`
pub async fn get_product(id: String, state: AppState) -> HandlerResult {
    let id = ProductId::new(id);
    respond(
        state
            .catalog
            .find_by_id(&id)
            .map(|product| json(&product).into_response())
            .ok_or_else(|| ApiError::not_found(format!("product not found: {id}"))),
    )
}

/// `GET /cart`
pub async fn get_cart(cookie: Option<String>, state: AppState) -> HandlerResult {
    let session = state.cookies.load(cookie.as_deref());
    let cart = state.cart();
    let view = CartView {
        cart_items: cart.lines(&session),
        voucher_code: cart.voucher(&session),
        summary: cart.summary(&session),
    };
    respond(with_session(json(&view), &state, &session))
}

/// `POST /cart`
pub async fn update_cart(cookie: Option<String>, form: CartForm, state: AppState) -> HandlerResult {
    respond(apply_cart_action(cookie.as_deref(), &form, &state))
}

fn apply_cart_action(
    cookie: Option<&str>,
    form: &CartForm,
    state: &AppState,
) -> Result<Response, ApiError> {
    let action: CartAction = form.action.parse()?;
    let mut session = state.cookies.load(cookie);
    let cart = state.cart();

    match action {
        CartAction::IncreaseQuantity => {
            cart.add_item(&mut session, &form.product_id()?, 1)?;
        }
        CartAction::DecreaseQuantity => {
            cart.add_item(&mut session, &form.product_id()?, -1)?;
        }
        CartAction::AddToCart => {
            cart.add_item(&mut session, &form.product_id()?, form.quantity.unwrap_or(1))?;
        }
        CartAction::RemoveFromCart => {
            cart.remove_item(&mut session, &form.product_id()?)?;
        }
        CartAction::ApplyVoucher => {
            cart.apply_voucher(&mut session, form.voucher_code.as_deref().unwrap_or_default())?;
        }
    }
    metrics::counter!("pizzeria_cart_actions_total", "action" => action.name()).increment(1);

    let body = CartUpdated {
        success: true,
        cart_items: cart.lines(&session),
        summary: cart.summary(&session),
    };
    with_session(json(&body), state, &session)
}

/// `GET /rules`
pub async fn list_rules(state: AppState) -> HandlerResult {
    Ok(json(&state.registry.names()).into_response())
}

/// `POST /rules`
pub async fn add_rule(body: serde_json::Value, state: AppState) -> HandlerResult {
    respond(
        state
            .registry
            .add_rule_json(body)
            .map(|()| warp::reply::with_status(json(&Success { success: true }), StatusCode::CREATED).into_response())
            .map_err(ApiError::from),
    )
}

/// `DELETE /rules/{name}`
pub async fn delete_rule(name: String, state: AppState) -> HandlerResult {
    let removed = state.registry.remove_rule(&name);
    Ok(json(&Success { success: removed }).into_response())
}

/// `POST /rules/run`
pub async fn run_rules(facts: Facts, state: AppState) -> HandlerResult {
    respond(
        state
            .registry
            .run(&facts)
            .map(|matched| json(&matched).into_response())
            .map_err(ApiError::from),
    )
}

/// `GET /health`
pub async fn health() -> HandlerResult {
    Ok("ok".into_response())
}
