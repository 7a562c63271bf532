//! Cookie-carrying client for driving the in-process site.

use std::collections::HashMap;

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test::{self, TestRequest};

/// Replays cookies between requests the way a browser would.
#[derive(Default)]
pub struct Browser {
    jar: HashMap<String, Cookie<'static>>,
}

impl Browser {
    /// Send `req` with the stored cookies and absorb any `Set-Cookie`.
    pub async fn send<S>(&mut self, app: &S, req: TestRequest) -> ServiceResponse
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = self
            .jar
            .values()
            .fold(req, |req, cookie| req.cookie(cookie.clone()));
        let res = test::call_service(app, req.to_request()).await;
        for cookie in res.response().cookies() {
            if cookie.value().is_empty() {
                self.jar.remove(cookie.name());
            } else {
                self.jar
                    .insert(cookie.name().to_owned(), cookie.into_owned());
            }
        }
        res
    }

    pub async fn get<S>(&mut self, app: &S, path: &str) -> ServiceResponse
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.send(app, TestRequest::get().uri(path)).await
    }

    pub async fn post_form<S>(
        &mut self,
        app: &S,
        path: &str,
        fields: &[(&str, &str)],
    ) -> ServiceResponse
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.send(app, TestRequest::post().uri(path).set_form(fields))
            .await
    }

    /// Follow a redirect and return the rendered page.
    pub async fn follow<S>(&mut self, app: &S, res: &ServiceResponse) -> String
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let target = location(res).expect("redirect location").to_owned();
        let page = self.get(app, &target).await;
        assert!(page.status().is_success(), "GET {target} failed");
        body_text(page).await
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.jar.contains_key(name)
    }
}

pub fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub async fn body_text(res: ServiceResponse) -> String {
    let body = test::read_body(res).await;
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

/// Post ids linked from a dashboard's edit buttons, in page order.
pub fn edit_ids(html: &str) -> Vec<String> {
    const MARKER: &str = r#"href="/edit/"#;
    html.match_indices(MARKER)
        .filter_map(|(start, _)| {
            let from = start + MARKER.len();
            html.get(from..from + 36).map(str::to_owned)
        })
        .collect()
}
