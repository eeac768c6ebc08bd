//! API Tests
//!
//! Full request flows through the warp filter tree, carrying the session
//! cookie from one response into the next request.

use pizzeria_server::{routes, AppState, ServerConfig};
use pizzeria_test_utils::{large_id, medium_id, small_id};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use warp::http::StatusCode;
use warp::Filter;
use warp::Reply;

fn state() -> AppState {
    AppState::new(ServerConfig::default().with_session_secret("test-secret")).unwrap()
}

fn body_json(response: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

/// `name=value` part of the response's `Set-Cookie`
fn session_cookie(response: &warp::http::Response<warp::hyper::body::Bytes>) -> String {
    let header = response.headers()["set-cookie"].to_str().unwrap();
    header.split(';').next().unwrap().to_string()
}

struct Client<F> {
    filter: F,
    cookie: Option<String>,
}

impl<F> Client<F>
where
    F: Filter + 'static,
    F::Extract: Reply + Send,
{
    fn new(filter: F) -> Self {
        Self { filter, cookie: None }
    }

    async fn post_cart(&mut self, form: &str) -> warp::http::Response<warp::hyper::body::Bytes> {
        let mut request = warp::test::request()
            .method("POST")
            .path("/cart")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(form.to_string());
        if let Some(cookie) = &self.cookie {
            request = request.header("cookie", cookie.as_str());
        }

        let response = request.reply(&self.filter).await;
        if response.status() == StatusCode::OK {
            self.cookie = Some(session_cookie(&response));
        }
        response
    }

    async fn get_cart(&mut self) -> Value {
        let mut request = warp::test::request().method("GET").path("/cart");
        if let Some(cookie) = &self.cookie {
            request = request.header("cookie", cookie.as_str());
        }
        let response = request.reply(&self.filter).await;
        assert_eq!(response.status(), StatusCode::OK);
        self.cookie = Some(session_cookie(&response));
        body_json(&response)
    }
}

#[tokio::test]
async fn list_and_get_products() {
    let api = routes(state());

    let response = warp::test::request().path("/products").reply(&api).await;
    assert_eq!(response.status(), StatusCode::OK);
    let products = body_json(&response);
    assert_eq!(products.as_array().unwrap().len(), 3);
    assert_eq!(products[0]["price"], "11.99");
    assert_eq!(products[0]["size"], "S");

    let response = warp::test::request()
        .path(&format!("/products/{}", large_id()))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(&response)["name"], "Large Pizza");

    let response = warp::test::request().path("/products/nope").reply(&api).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(&response)["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn empty_cart_sets_cookie() {
    let api = routes(state());
    let response = warp::test::request().path("/cart").reply(&api).await;

    assert_eq!(response.status(), StatusCode::OK);
    let header = response.headers()["set-cookie"].to_str().unwrap();
    assert!(header.starts_with("__session="));
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("SameSite=Lax"));
    assert!(header.contains("Max-Age=604800"));

    let body = body_json(&response);
    assert_eq!(body["cartItems"], json!([]));
    assert_eq!(body["voucherCode"], "");
    assert_eq!(body["summary"]["totalItemCount"], 0);
}

#[tokio::test]
async fn microsoft_voucher_flow() {
    let mut client = Client::new(routes(state()));
    let small = small_id();

    let response = client
        .post_cart(&format!("action=addToCart&productId={small}&quantity=2"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(&response)["success"], true);

    let response = client.post_cart("action=applyVoucher&voucherCode=Microsoft").await;
    assert_eq!(body_json(&response)["cartItems"][0]["promoQuantity"], 2);

    let response = client
        .post_cart(&format!("action=increaseQuantity&productId={small}"))
        .await;
    let body = body_json(&response);
    assert_eq!(body["cartItems"][0]["quantity"], 3);
    assert_eq!(body["cartItems"][0]["promoQuantity"], 2);
    assert_eq!(body["cartItems"][0]["lineTotal"], "35.97");
    assert_eq!(body["cartItems"][0]["promoLineTotal"], "23.98");
    assert_eq!(body["summary"]["promoGrandTotal"], "23.98");

    let response = client
        .post_cart(&format!("action=decreaseQuantity&productId={small}"))
        .await;
    assert_eq!(body_json(&response)["cartItems"][0]["promoQuantity"], 2);

    let cart = client.get_cart().await;
    assert_eq!(cart["voucherCode"], "Microsoft");
    assert_eq!(cart["cartItems"][0]["quantity"], 2);
}

#[tokio::test]
async fn remove_from_cart_deletes_line() {
    let mut client = Client::new(routes(state()));

    client
        .post_cart(&format!("action=addToCart&productId={}&quantity=3", medium_id()))
        .await;
    client
        .post_cart(&format!("action=increaseQuantity&productId={}", large_id()))
        .await;
    let response = client
        .post_cart(&format!("action=removeFromCart&productId={}", medium_id()))
        .await;

    let body = body_json(&response);
    assert_eq!(body["cartItems"].as_array().unwrap().len(), 1);
    assert_eq!(body["cartItems"][0]["productId"], large_id().as_str());
    assert_eq!(body["summary"]["totalItemCount"], 1);
}

#[tokio::test]
async fn unknown_action_is_400() {
    let mut client = Client::new(routes(state()));
    let response = client.post_cart("action=bake").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn missing_action_is_400() {
    let mut client = Client::new(routes(state()));
    let response = client.post_cart("productId=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_product_is_404_and_cart_unchanged() {
    let mut client = Client::new(routes(state()));
    client
        .post_cart(&format!("action=increaseQuantity&productId={}", small_id()))
        .await;

    let response = client.post_cart("action=increaseQuantity&productId=ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.post_cart("action=removeFromCart&productId=ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let cart = client.get_cart().await;
    assert_eq!(cart["cartItems"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn oversized_voucher_is_413_and_cart_unchanged() {
    let mut client = Client::new(routes(state()));
    client
        .post_cart(&format!("action=addToCart&productId={}&quantity=1", small_id()))
        .await;

    let voucher = "V".repeat(2500);
    let response = client
        .post_cart(&format!("action=applyVoucher&voucherCode={voucher}"))
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.headers().get("set-cookie").is_none());
    assert!(body_json(&response)["error"].as_str().unwrap().contains("4096"));

    let cart = client.get_cart().await;
    assert_eq!(cart["cartItems"].as_array().unwrap().len(), 1);
    assert_eq!(cart["voucherCode"], "");
}

#[tokio::test]
async fn tampered_cookie_starts_fresh() {
    let mut client = Client::new(routes(state()));
    client
        .post_cart(&format!("action=addToCart&productId={}&quantity=2", small_id()))
        .await;

    let cookie = client.cookie.clone().unwrap();
    let (name_and_payload, tag) = cookie.rsplit_once('.').unwrap();
    let flipped = if tag.starts_with('0') { "1" } else { "0" };
    client.cookie = Some(format!("{name_and_payload}.{flipped}{}", &tag[1..]));

    let cart = client.get_cart().await;
    assert_eq!(cart["cartItems"], json!([]));
}

#[tokio::test]
async fn cookie_from_other_secret_is_ignored() {
    let mut first = Client::new(routes(state()));
    first
        .post_cart(&format!("action=addToCart&productId={}&quantity=1", small_id()))
        .await;

    let other = AppState::new(ServerConfig::default().with_session_secret("other")).unwrap();
    let mut second = Client::new(routes(other));
    second.cookie = first.cookie.clone();

    let cart = second.get_cart().await;
    assert_eq!(cart["cartItems"], json!([]));
}

#[tokio::test]
async fn rules_admin_flow() {
    let api = routes(state());

    let response = warp::test::request().path("/rules").reply(&api).await;
    assert_eq!(body_json(&response), json!(["microsoft", "facebook", "amazon"]));

    let response = warp::test::request()
        .method("POST")
        .path("/rules")
        .json(&json!({
            "name": "pepsi",
            "conditions": { "all": [
                { "fact": "voucherCode", "operator": "equal", "value": "Pepsi" },
                { "fact": "size", "operator": "equal", "value": "M" }
            ] },
            "event": { "type": "DISCOUNT", "params": { "size": "M", "price": "9.99" } }
        }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = warp::test::request()
        .method("POST")
        .path("/rules/run")
        .json(&json!({ "voucherCode": "Pepsi", "size": "M", "quantity": 1 }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let matched = body_json(&response);
    assert_eq!(matched[0]["rule"], "pepsi");
    assert_eq!(matched[0]["event"]["type"], "DISCOUNT");

    let response = warp::test::request()
        .method("DELETE")
        .path("/rules/pepsi")
        .reply(&api)
        .await;
    assert_eq!(body_json(&response), json!({ "success": true }));

    let response = warp::test::request()
        .method("DELETE")
        .path("/rules/pepsi")
        .reply(&api)
        .await;
    assert_eq!(body_json(&response), json!({ "success": false }));
}

#[tokio::test]
async fn invalid_rule_is_400() {
    let api = routes(state());

    let response = warp::test::request()
        .method("POST")
        .path("/rules")
        .json(&json!({
            "name": "leaf",
            "conditions": { "fact": "size", "operator": "equal", "value": "S" },
            "event": { "type": "DEAL", "params": { "size": "S", "buy": 3, "deal": 2 } }
        }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = warp::test::request()
        .method("POST")
        .path("/rules")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn run_with_missing_fact_is_400() {
    let api = routes(state());
    let response = warp::test::request()
        .method("POST")
        .path("/rules/run")
        .json(&json!({ "size": "S" }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_and_unknown_route() {
    let api = routes(state());

    let response = warp::test::request().path("/health").reply(&api).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"ok");

    let response = warp::test::request().path("/oven").reply(&api).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
