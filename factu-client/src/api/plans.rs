//! Plan catalog, current plan and limit checks

use shared::models::{LimitCheck, MyPlan, Plan, PlanResource};

use super::segment;
use crate::error::ClientResult;
use crate::http::HttpClient;

pub struct PlansApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> PlansApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    /// Public plan catalog, no login required
    pub async fn catalog(&self) -> ClientResult<Vec<Plan>> {
        self.http.get_public("/api/planes").await
    }

    pub async fn my_plan(&self) -> ClientResult<MyPlan> {
        self.http.get("/api/mi-plan").await
    }

    /// Ask whether one more `resource` may be created.
    ///
    /// A failed check answers [`LimitCheck::permissive`]; the backend still
    /// enforces the limit on create.
    pub async fn check_limit(&self, resource: PlanResource) -> LimitCheck {
        let path = format!("/api/verificar-limite/{}", segment(resource.as_str()));
        match self.http.get::<LimitCheck>(&path).await {
            Ok(check) => check,
            Err(e) => {
                tracing::warn!(%resource, error = %e, "Limit check failed, allowing");
                LimitCheck::permissive()
            }
        }
    }
}
