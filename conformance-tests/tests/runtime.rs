use std::collections::HashMap;

use pretty_assertions::assert_eq;
use rpc_contract_conformance_tests::contract::v1::{
    lookup_request, my_service_contract_test, my_service_server::MyService, Item, LookupRequest,
    LookupResponse, MyMethodRequest, MyMethodResponse, MyServiceContractClient, Status as ItemStatus,
};
use tokio_util::sync::CancellationToken;
use tonic::{Code, Request, Response, Status};

/// Server following the contract, with its `MyMethod` answers configurable.
struct Implementation {
    answer: i64,
    not_found_message: &'static str,
}

impl Implementation {
    fn conforming() -> Self {
        Self {
            answer: 42,
            not_found_message: "ANOTHER_VALUE NotFound",
        }
    }
}

#[tonic::async_trait]
impl MyService for Implementation {
    async fn my_method(
        &self,
        request: Request<MyMethodRequest>,
    ) -> Result<Response<MyMethodResponse>, Status> {
        if request.into_inner().request_field == "VALUE" {
            Ok(Response::new(MyMethodResponse {
                response_field: self.answer,
            }))
        } else {
            Err(Status::not_found(self.not_found_message))
        }
    }

    async fn lookup(
        &self,
        request: Request<LookupRequest>,
    ) -> Result<Response<LookupResponse>, Status> {
        if request.into_inner() == lookup_request() {
            Ok(Response::new(lookup_response()))
        } else {
            Err(Status::not_found("no such lookup"))
        }
    }

    type WatchStream = tokio_stream::Empty<Result<MyMethodResponse, Status>>;

    async fn watch(
        &self,
        _request: Request<MyMethodRequest>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        Ok(Response::new(tokio_stream::empty()))
    }

    async fn ping(&self, _request: Request<()>) -> Result<Response<()>, Status> {
        Ok(Response::new(()))
    }
}

fn lookup_request() -> LookupRequest {
    LookupRequest {
        r#type: "user".to_string(),
        filter: Some(lookup_request::Filter {
            status: ItemStatus::Active as i32,
            token: vec![1, 2],
        }),
        ids: vec!["a".to_string(), "b".to_string()],
        selector: Some(lookup_request::Selector::Name("alice".to_string())),
        limit: Some(10),
        weights: HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]),
        note: Some("hello".to_string()),
    }
}

fn lookup_response() -> LookupResponse {
    LookupResponse {
        items: vec![Item {
            id: "a".to_string(),
            status: ItemStatus::Active as i32,
        }],
        fetched_at: Some(prost_types::Timestamp {
            seconds: 1_704_164_645,
            nanos: 0,
        }),
        score: 0.5,
        partial: true,
        offset: -7,
        ratio: 1.5,
    }
}

#[tokio::test]
async fn test_mock_answers_my_method_from_contract() {
    let mut mock = MyServiceContractClient;

    let found = mock
        .my_method(MyMethodRequest {
            request_field: "VALUE".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(found.into_inner().response_field, 42);

    let missing = mock
        .my_method(MyMethodRequest {
            request_field: "ANOTHER_VALUE".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(missing.code(), Code::NotFound);
    assert_eq!(missing.message(), "ANOTHER_VALUE NotFound");

    let other = mock
        .my_method(MyMethodRequest {
            request_field: "OTHER".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(other.into_inner(), MyMethodResponse::default());
}

#[tokio::test]
async fn test_mock_matches_rich_lookup_request() {
    let mut mock = MyServiceContractClient;

    let response = mock.lookup(lookup_request()).await.unwrap();
    assert_eq!(response.into_inner(), lookup_response());

    let mut other = lookup_request();
    other.limit = Some(11);
    let response = mock.lookup(other).await.unwrap();
    assert_eq!(response.into_inner(), LookupResponse::default());
}

#[tokio::test]
async fn test_mock_methods_without_cases_answer_default() {
    let mut mock = MyServiceContractClient;
    assert!(mock.ping(()).await.is_ok());
}

#[tokio::test]
async fn test_conforming_server_passes() {
    my_service_contract_test(Implementation::conforming(), CancellationToken::new()).await;
}

#[tokio::test]
async fn test_mock_backed_server_passes() {
    struct FromMock;

    #[tonic::async_trait]
    impl MyService for FromMock {
        async fn my_method(
            &self,
            request: Request<MyMethodRequest>,
        ) -> Result<Response<MyMethodResponse>, Status> {
            MyServiceContractClient.my_method(request).await
        }

        async fn lookup(
            &self,
            request: Request<LookupRequest>,
        ) -> Result<Response<LookupResponse>, Status> {
            MyServiceContractClient.lookup(request).await
        }

        type WatchStream = tokio_stream::Empty<Result<MyMethodResponse, Status>>;

        async fn watch(
            &self,
            _request: Request<MyMethodRequest>,
        ) -> Result<Response<Self::WatchStream>, Status> {
            Err(Status::unimplemented("watch"))
        }

        async fn ping(&self, request: Request<()>) -> Result<Response<()>, Status> {
            MyServiceContractClient.ping(request).await
        }
    }

    my_service_contract_test(FromMock, CancellationToken::new()).await;
}

#[tokio::test]
#[should_panic(expected = "MyMethod/unknown value: expected status NotFound")]
async fn test_different_status_text_fails() {
    let server = Implementation {
        not_found_message: "ANOTHER_VALUE missing",
        ..Implementation::conforming()
    };
    my_service_contract_test(server, CancellationToken::new()).await;
}

#[tokio::test]
#[should_panic(expected = "MyMethod/known value: response mismatch")]
async fn test_different_response_fails() {
    let server = Implementation {
        answer: 41,
        ..Implementation::conforming()
    };
    my_service_contract_test(server, CancellationToken::new()).await;
}
