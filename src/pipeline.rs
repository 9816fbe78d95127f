use crate::{
    responder::Responder,
    types::{BoxedMiddleware, Request, Response},
};

/// An ordered chain of request-processing steps.
///
/// Each step receives the request and either returns it (possibly mutated) so
/// the next step runs, or reports an error value that is rendered as a
/// response and aborts the run.
pub struct Pipeline {
    middlewares: Vec<BoxedMiddleware>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    pub fn middleware<F, Fut, R>(&mut self, f: F)
    where
        F: Fn(Request) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<Request, R>> + Send + 'static,
        R: Responder + Send + 'static,
    {
        let mw: BoxedMiddleware = Box::new(move |req: Request| {
            let f = f.clone();
            Box::pin(async move {
                match f(req).await {
                    Ok(r) => Ok(r),
                    Err(e) => Err(e.into_response()),
                }
            })
        });

        self.middlewares.push(mw);
    }

    /// Runs the chain in registration order.
    pub async fn run(&self, mut req: Request) -> Result<Request, Response> {
        for mw in &self.middlewares {
            match mw(req).await {
                Ok(r) => req = r,
                Err(resp) => return Err(resp),
            }
        }

        Ok(req)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::{
        body::IntakeBody,
        extractors::structured::StructuredBody,
        interpret::BodyInterpreter,
    };

    fn empty_request() -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .body(IntakeBody::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn runs_middleware_in_registration_order() {
        let mut pipeline = Pipeline::new();
        pipeline.middleware(|mut req: Request| async move {
            req.headers_mut().insert("x-first", "1".parse().unwrap());
            Ok::<_, Response>(req)
        });
        pipeline.middleware(|req: Request| async move {
            assert!(req.headers().contains_key("x-first"));
            Ok::<_, Response>(req)
        });

        assert!(pipeline.run(empty_request()).await.is_ok());
    }

    #[tokio::test]
    async fn first_error_short_circuits_the_run() {
        let reached = Arc::new(AtomicBool::new(false));

        let mut pipeline = Pipeline::new();
        pipeline.middleware(|_req: Request| async move {
            Err::<Request, _>((StatusCode::UNAUTHORIZED, "denied"))
        });
        let flag = reached.clone();
        pipeline.middleware(move |req: Request| {
            let flag = flag.clone();
            async move {
                flag.store(true, Ordering::SeqCst);
                Ok::<_, Response>(req)
            }
        });

        let resp = pipeline.run(empty_request()).await.unwrap_err();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn interpreter_installs_as_a_step() {
        let mut pipeline = Pipeline::new();
        pipeline.middleware(BodyInterpreter::new().into_middleware());

        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(IntakeBody::from(r#"{"a":1}"#))
            .unwrap();

        let req = pipeline.run(req).await.unwrap();
        assert_eq!(
            req.extensions().get::<StructuredBody>().map(|b| &b.0),
            Some(&json!({"a": 1}))
        );
    }

    #[tokio::test]
    async fn interpreter_error_renders_as_bad_request() {
        let mut pipeline = Pipeline::new();
        pipeline.middleware(BodyInterpreter::new().into_middleware());

        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(IntakeBody::from("{invalid"))
            .unwrap();

        let resp = pipeline.run(req).await.unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
