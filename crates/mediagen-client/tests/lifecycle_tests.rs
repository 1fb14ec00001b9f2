//! Provider-backed behavior of the image and video services, exercised
//! against a mock provider.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mediagen_client::{
    ImageOptions, ImageService, ImageUpload, ProviderClient, ProviderError, VideoCreateParams,
    VideoService,
};
use mediagen_models::{ImageModel, VideoJobStatus};

fn test_client(server: &MockServer) -> ProviderClient {
    ProviderClient::new(Some("test-key".to_string()), server.uri())
}

fn png_upload() -> ImageUpload {
    ImageUpload::new("scene.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

#[tokio::test]
async fn dalle3_request_clamps_n_to_one() {
    let server = MockServer::start().await;
    let payload = BASE64.encode(b"first-image-bytes");

    // Only matches when the body actually carries n=1.
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(json!({"model": "dall-e-3", "n": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"b64_json": payload}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = ImageService::new(&client);
    let opts = ImageOptions {
        model: ImageModel::DallE3,
        n: 4,
        ..Default::default()
    };

    let bytes = service.generate("a sunset over mountains", &opts).await.unwrap();
    assert_eq!(bytes, b"first-image-bytes");
}

#[tokio::test]
async fn generate_fails_on_empty_result_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = ImageService::new(&client);

    let err = service
        .generate("a cat", &ImageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Validation(_)));
}

#[tokio::test]
async fn result_without_payload_or_url_is_a_contract_violation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"revised_prompt": "a cat, but fancier"}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = ImageService::new(&client);

    let err = service
        .generate("a cat", &ImageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Validation(_)));
}

#[tokio::test]
async fn result_url_is_fetched_when_inline_payload_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/generated/result.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"url-image-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": format!("{}/generated/result.png", server.uri())}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = ImageService::new(&client);

    let bytes = service
        .generate("a cat", &ImageOptions::default())
        .await
        .unwrap();
    assert_eq!(bytes, b"url-image-bytes");
}

#[tokio::test]
async fn edit_with_zero_images_fails_before_any_remote_call() {
    let server = MockServer::start().await;

    let client = test_client(&server);
    let service = ImageService::new(&client);

    let err = service
        .edit("replace the mug with a teapot", &[], ImageModel::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Validation(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no HTTP request should have been issued");
}

#[tokio::test]
async fn edit_returns_first_result_bytes() {
    let server = MockServer::start().await;
    let payload = BASE64.encode(b"edited-bytes");
    Mock::given(method("POST"))
        .and(path("/images/edits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"b64_json": payload}, {"b64_json": BASE64.encode(b"second")}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = ImageService::new(&client);

    let bytes = service
        .edit(
            "replace the product in the first image with the one from the second",
            &[png_upload(), png_upload()],
            ImageModel::default(),
        )
        .await
        .unwrap();
    assert_eq!(bytes, b"edited-bytes");
}

#[tokio::test]
async fn missing_credential_fails_without_touching_the_network() {
    let server = MockServer::start().await;

    let client = ProviderClient::new(None, server.uri());
    let service = VideoService::new(&client);

    let err = service.get_status("video_123").await.unwrap_err();
    assert!(matches!(err, ProviderError::Configuration(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_returns_job_id_without_waiting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos"))
        .and(body_partial_json(json!({
            "prompt": "a calico cat playing piano",
            "model": "sora-2",
            "seconds": "4",
            "size": "720x1280"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_abc",
            "status": "queued"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = VideoService::new(&client);

    let id = service
        .create("a calico cat playing piano", VideoCreateParams::default())
        .await
        .unwrap();
    assert_eq!(id, "video_abc");
}

#[tokio::test]
async fn wait_until_done_settles_after_pending_observations() {
    let server = MockServer::start().await;

    // Four non-terminal polls, then completed for the rest of the test.
    Mock::given(method("GET"))
        .and(path("/videos/video_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_abc",
            "status": "pending"
        })))
        .up_to_n_times(4)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos/video_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_abc",
            "status": "completed"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos/video_abc/content"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = VideoService::new(&client);

    let status = service
        .wait_until_done(
            "video_abc",
            Duration::from_millis(20),
            Some(Duration::from_secs(5)),
        )
        .await
        .unwrap();
    assert_eq!(status, VideoJobStatus::Completed);

    let bytes = service.download("video_abc").await.unwrap();
    assert_eq!(bytes.as_ref(), b"mp4-bytes");
}

#[tokio::test]
async fn wait_until_done_times_out_on_a_stuck_job() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/video_stuck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_stuck",
            "status": "in_progress"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = VideoService::new(&client);

    let err = service
        .wait_until_done(
            "video_stuck",
            Duration::from_millis(10),
            Some(Duration::from_millis(80)),
        )
        .await
        .unwrap_err();
    match err {
        ProviderError::Timeout { video_id, .. } => assert_eq!(video_id, "video_stuck"),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn wait_without_timeout_never_raises_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/video_slow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_slow",
            "status": "pending"
        })))
        .up_to_n_times(6)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos/video_slow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_slow",
            "status": "completed"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = VideoService::new(&client);

    let status = service
        .wait_until_done("video_slow", Duration::from_millis(5), None)
        .await
        .unwrap();
    assert_eq!(status, VideoJobStatus::Completed);
}

#[tokio::test]
async fn download_of_failed_job_carries_provider_detail_and_skips_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/video_bad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_bad",
            "status": "failed",
            "error": {"code": "moderation_blocked", "message": "content policy violation"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos/video_bad/content"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = VideoService::new(&client);

    let err = service.download("video_bad").await.unwrap_err();
    match err {
        ProviderError::JobFailed { video_id, detail } => {
            assert_eq!(video_id, "video_bad");
            assert_eq!(detail, "content policy violation");
        }
        other => panic!("expected JobFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn download_of_pending_job_is_not_ready() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/video_wip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_wip",
            "status": "in_progress"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos/video_wip/content"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = VideoService::new(&client);

    let err = service.download("video_wip").await.unwrap_err();
    match err {
        ProviderError::NotReady { status, .. } => assert_eq!(status, VideoJobStatus::InProgress),
        other => panic!("expected NotReady, got {other:?}"),
    }
}

#[tokio::test]
async fn remix_returns_a_new_independent_job_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos/video_abc/remix"))
        .and(body_partial_json(json!({"prompt": "extend with the cat taking a bow"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_def",
            "status": "queued"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = VideoService::new(&client);

    let new_id = service
        .remix("video_abc", "extend with the cat taking a bow")
        .await
        .unwrap();
    assert_eq!(new_id, "video_def");
}

#[tokio::test]
async fn provider_error_body_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/video_gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error": "video not found"}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let service = VideoService::new(&client);

    let err = service.get_status("video_gone").await.unwrap_err();
    match err {
        ProviderError::Api { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("video not found"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
