//! Integration tests for the typed DocuChat endpoints

use docuchat_http::types::{DocType, PromptRequest, UploadPdf};
use docuchat_http::{ApiClient, ClientConfig, ClientError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_builder() {
    let client = ApiClient::builder()
        .base_url("http://localhost:8000/")
        .timeout(Duration::from_secs(5))
        .build();

    assert!(client.is_ok());
    assert_eq!(client.unwrap().base_url(), "http://localhost:8000");
}

#[tokio::test]
async fn test_client_builder_rejects_bad_base_url() {
    let result = ApiClient::builder().base_url("not a url").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));

    let result = ApiClient::builder()
        .config(ClientConfig::new("ftp://files.example.com"))
        .build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_pdf_detail_decodes_string_encoded_extraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pdfs/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "filename": "invoice.pdf",
            "doc_type": "invoice",
            "extracted_data": "{\"total\": 42, \"vendor\": \"ACME\"}"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let detail = client.pdf_detail("p1").await.unwrap();

    let data = detail.extracted_data.value().unwrap();
    assert_eq!(data["total"], 42);
    assert_eq!(data["vendor"], "ACME");
}

#[tokio::test]
async fn test_pdf_detail_keeps_malformed_extraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pdfs/p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p2",
            "filename": "broken.pdf",
            "extracted_data": "{not json"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let detail = client.pdf_detail("p2").await.unwrap();

    assert!(detail.extracted_data.is_malformed());
    assert!(detail.extracted_data.value().is_none());
    assert_eq!(detail.filename, "broken.pdf");
}

#[tokio::test]
async fn test_pdf_chunks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pdfs/p1/chunks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "c1", "chunk_num": 0, "page": 1, "content": "Hello", "char_count": 5,
             "processed": true, "has_analysis": false},
            {"id": "c2", "chunk_num": 1, "content": "World", "char_count": 5}
        ])))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let chunks = client.pdf_chunks("p1").await.unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].page, Some(1));
    assert!(chunks[0].processed);
    assert_eq!(chunks[1].page, None);
    assert!(!chunks[1].processed);
}

#[tokio::test]
async fn test_chunk_files_accept_numeric_strings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chunks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"filename": "a.pdf", "chunk_count": 3},
            {"filename": "b.pdf", "chunk_count": "7"}
        ])))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let files = client.list_chunk_files().await.unwrap();

    assert_eq!(files[0].chunk_count, Some(3));
    assert_eq!(files[1].chunk_count, Some(7));
}

#[tokio::test]
async fn test_upload_pdf_sends_multipart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pdfs/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\"; filename=\"report.pdf\""))
        .and(body_string_contains("name=\"doc_type\""))
        .and(body_string_contains("medical"))
        .and(body_string_contains("name=\"goal\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "PDF processed",
            "pdf_id": "p9",
            "processed_chunks": 4,
            "total_chunks": 4
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let receipt = client
        .upload_pdf(UploadPdf {
            file_name: "report.pdf".into(),
            contents: bytes::Bytes::from_static(b"%PDF-1.4 test"),
            doc_type: Some(DocType::Medical),
            goal: Some("Summarize diagnoses".into()),
        })
        .await
        .unwrap();

    assert_eq!(receipt.pdf_id.as_deref(), Some("p9"));
    assert_eq!(receipt.processed_chunks, Some(4));
}

#[tokio::test]
async fn test_upload_pdf_requires_file_name() {
    let mock_server = MockServer::start().await;
    let client = ApiClient::new(mock_server.uri()).unwrap();

    let err = client
        .upload_pdf(UploadPdf {
            file_name: "  ".into(),
            contents: bytes::Bytes::new(),
            doc_type: None,
            goal: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::BadRequest(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rag_query_structured_answer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rag/query"))
        .and(body_json(json!({"question": "What is the total?", "doc_type": "invoice"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"answer": "42 EUR", "source": "invoice.pdf", "confidence": 0.9},
            "retrieved_chunks": [{"content": "Total: 42 EUR"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let answer = client
        .rag_query("What is the total?", DocType::Invoice)
        .await
        .unwrap();

    assert_eq!(answer.answer(), Some("42 EUR"));
    assert_eq!(answer.source(), Some("invoice.pdf"));
    assert_eq!(answer.confidence(), Some(0.9));
}

#[tokio::test]
async fn test_rag_query_plain_answer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rag/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "No idea."})))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let answer = client.rag_query("?", DocType::Default).await.unwrap();

    assert_eq!(answer.answer(), Some("No idea."));
    assert_eq!(answer.source(), None);
}

#[tokio::test]
async fn test_engineer_prompt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt/engineer"))
        .and(body_json(json!({"text": "Patient has a fever", "goal": "Extract symptoms"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "fever"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let response = client
        .engineer_prompt(&PromptRequest {
            text: "Patient has a fever".into(),
            goal: Some("Extract symptoms".into()),
            doc_type: None,
        })
        .await
        .unwrap();

    assert_eq!(response.response, "fever");
}

#[tokio::test]
async fn test_validation_errors_are_flattened() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt/engineer"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["body", "text"], "msg": "field required", "type": "value_error.missing"}]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let err = client
        .engineer_prompt(&PromptRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(err.detail().contains("field required"));
}
