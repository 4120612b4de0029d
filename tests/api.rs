use std::io::Cursor;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde_json::{Value, json};

use qrforge::config::AppConfig;
use qrforge::routes::init_routes;
use qrforge::state::app_state::AppState;

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(AppConfig::default()))
}

macro_rules! app {
    () => {{
        let state = state();
        test::init_service(
            App::new()
                .app_data(state.json_config())
                .app_data(state.payload_config())
                .app_data(state.clone())
                .configure(init_routes),
        )
        .await
    }};
}

const SCRIPTED_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" onload="alert(1)"><script>alert(2)</script><rect width="10" height="10" fill="#1e64c8"/></svg>"##;

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn png_logo() -> Vec<u8> {
    let img = RgbaImage::from_pixel(12, 12, Rgba([10, 120, 200, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[actix_web::test]
async fn health_check_reports_success() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/health/check").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "success": true }));
}

#[actix_web::test]
async fn payload_for_wifi_is_escaped() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/payload")
        .set_json(json!({
            "type": "wifi",
            "ssid": "Cafe;Net",
            "password": "p@ss:word",
            "encryption": "WPA",
            "hidden": false
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"], r"WIFI:T:WPA;S:Cafe\;Net;P:p@ss\:word;H:false;;");
    assert!(body.get("warning").is_none());
}

#[actix_web::test]
async fn payload_errors_are_keyed_by_field() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/payload")
        .set_json(json!({ "type": "wifi", "ssid": "", "encryption": "WEP" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["ssid"], "SSID is required.");
    assert_eq!(
        body["errors"]["password"],
        "Password is required for secured networks."
    );
}

#[actix_web::test]
async fn long_text_carries_a_warning() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/payload")
        .set_json(json!({ "type": "text", "text": "a".repeat(501) }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"].as_str().unwrap().len(), 501);
    assert!(body["warning"].as_str().unwrap().contains("501 characters"));
}

#[actix_web::test]
async fn malformed_json_is_a_json_error() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/payload")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(r#"{"type":"fax"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn qr_png_download() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/qr")
        .set_json(json!({
            "input": { "type": "url", "url": "https://example.com" },
            "settings": { "size": 300 },
            "format": "png"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"qr-url.png\""
    );
    let bytes = test::read_body(resp).await;
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.width(), 300);
}

#[actix_web::test]
async fn qr_svg_and_pdf_downloads() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/qr")
        .set_json(json!({
            "input": { "type": "phone", "phone": "+1 650 253 0000" },
            "format": "svg"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let svg = test::read_body(resp).await;
    assert!(svg.starts_with(b"<svg"));

    let req = test::TestRequest::post()
        .uri("/api/qr")
        .set_json(json!({
            "input": { "type": "text", "text": "label me" },
            "format": "pdf",
            "page_size": "Letter",
            "layout": "grid-2x5"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"qr-text-grid-2x5-Letter.pdf\""
    );
    let pdf = test::read_body(resp).await;
    assert!(pdf.starts_with(b"%PDF"));
}

#[actix_web::test]
async fn qr_rejects_invalid_input() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/qr")
        .set_json(json!({ "input": { "type": "url", "url": "ftp://example.com" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["url"],
        "URL must start with http:// or https://."
    );
}

#[actix_web::test]
async fn qr_too_large_to_encode_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/qr")
        .set_json(json!({
            "input": { "type": "text", "text": "x".repeat(4000) },
            "settings": { "ecc_level": "H" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Unable to generate QR code")
    );
}

#[actix_web::test]
async fn quality_flags_low_contrast() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/quality")
        .set_json(json!({
            "payload": "https://example.com",
            "settings": { "colors": { "foreground": "#777777", "background": "#888888" } }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["low_contrast"], true);
    assert!(body["contrast_ratio"].as_f64().unwrap() < 3.0);
    assert_eq!(body["effective_ecc_level"], "M");

    let req = test::TestRequest::post()
        .uri("/api/quality")
        .set_json(json!({ "payload": "" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["score"], 0);
    assert_eq!(body["label"], "Waiting for data");
}

#[actix_web::test]
async fn presets_are_listed() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/presets").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<&str> = body["presets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["print", "stickers", "dark"]);
}

#[actix_web::test]
async fn settings_merge_preset_then_patch() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/settings")
        .set_json(json!({ "preset": "dark" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["settings"]["colors"]["background"], "#0b0f1a");
    assert_eq!(body["settings"]["ecc_level"], "Q");
    assert_eq!(body["active_presets"], json!(["dark"]));

    let req = test::TestRequest::post()
        .uri("/api/settings")
        .set_json(json!({
            "settings": body["settings"],
            "patch": { "size": 5000, "colors": { "foreground": "#000000" } }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["settings"]["size"], 2048);
    assert_eq!(body["settings"]["colors"]["background"], "#0b0f1a");
    assert_eq!(body["active_presets"], json!([]));
}

#[actix_web::test]
async fn unknown_preset_is_rejected() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/settings")
        .set_json(json!({ "preset": "neon" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn logo_upload_round_trips_into_render() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/logo")
        .insert_header((header::CONTENT_TYPE, "image/png"))
        .set_payload(png_logo())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let data_url = body["data_url"].as_str().unwrap().to_string();
    assert!(data_url.starts_with("data:image/png;base64,"));

    let req = test::TestRequest::post()
        .uri("/api/qr")
        .set_json(json!({
            "input": { "type": "url", "url": "https://example.com" },
            "settings": { "logo": { "enabled": true, "data_url": data_url } },
            "format": "svg"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let svg = test::read_body(resp).await;
    let svg = std::str::from_utf8(&svg).unwrap();
    assert!(svg.contains("<image href=\"data:image/png;base64,"));
}

#[actix_web::test]
async fn logo_upload_rejects_other_types() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/logo")
        .set_payload("GIF89a not really")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Only PNG, JPG, or SVG files are allowed.");
}

#[actix_web::test]
async fn settings_patch_with_bad_logo_is_rejected() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/settings")
        .set_json(json!({ "patch": { "logo": { "enabled": true, "data_url": "not-an-image" } } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Logo must be a base64 data URL.");

    // whole settings are held to the same rules
    let req = test::TestRequest::post()
        .uri("/api/settings")
        .set_json(json!({
            "settings": { "logo": { "enabled": true, "data_url": "data:image/png;base64,AAAA" } }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn oversized_logo_in_render_settings_is_rejected() {
    let app = app!();
    let huge = data_url("image/png", &vec![0u8; 5 * 1024 * 1024 + 1]);
    let req = test::TestRequest::post()
        .uri("/api/qr")
        .set_json(json!({
            "input": { "type": "url", "url": "https://example.com" },
            "settings": { "logo": { "enabled": true, "data_url": huge } },
            "format": "png"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Logo must be 5MB or smaller.");
}

#[actix_web::test]
async fn svg_logo_in_render_settings_is_scrubbed() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/qr")
        .set_json(json!({
            "input": { "type": "url", "url": "https://example.com" },
            "settings": {
                "logo": { "enabled": true, "data_url": data_url("image/svg+xml", SCRIPTED_SVG.as_bytes()) }
            },
            "format": "svg"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let svg = test::read_body(resp).await;
    let svg = std::str::from_utf8(&svg).unwrap();

    let prefix = "<image href=\"data:image/svg+xml;base64,";
    let start = svg.find(prefix).unwrap() + prefix.len();
    let end = start + svg[start..].find('"').unwrap();
    let embedded = String::from_utf8(STANDARD.decode(&svg[start..end]).unwrap()).unwrap();
    assert!(!embedded.contains("script"), "{embedded}");
    assert!(!embedded.contains("onload"), "{embedded}");
    assert!(embedded.contains("<rect"));
}

#[actix_web::test]
async fn svg_logo_upload_renders_into_png() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/logo")
        .set_payload(SCRIPTED_SVG)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let logo = body["data_url"].as_str().unwrap().to_string();
    assert!(logo.starts_with("data:image/svg+xml;base64,"));

    let req = test::TestRequest::post()
        .uri("/api/qr")
        .set_json(json!({
            "input": { "type": "text", "text": "hello" },
            "settings": { "logo": { "enabled": true, "data_url": logo } },
            "format": "png"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = test::read_body(resp).await;
    let image = image::load_from_memory(&bytes).unwrap().to_rgba8();
    // center of the logo box carries the logo color
    let Rgba([r, g, b, _]) = *image.get_pixel(256, 256);
    assert!(b > 150 && r < 80 && g < 150, "logo not drawn: {r} {g} {b}");
}

#[actix_web::test]
async fn quality_rejects_garbage_logo() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/quality")
        .set_json(json!({
            "payload": "https://example.com",
            "settings": { "logo": { "enabled": true, "data_url": "garbage" } }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
