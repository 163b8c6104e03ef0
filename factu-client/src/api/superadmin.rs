//! Platform administration (super-admin role only)
//!
//! Plan CRUD goes through [`ResourceApi<Plan, _>`](super::ResourceApi).

use shared::models::{AdminDashboard, ChangePlanRequest, MessageResponse, Organization};

use super::segment;
use crate::error::ClientResult;
use crate::http::HttpClient;

pub struct SuperAdminApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> SuperAdminApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    pub async fn dashboard(&self) -> ClientResult<AdminDashboard> {
        self.http.get("/api/superadmin/dashboard").await
    }

    pub async fn organizations(&self) -> ClientResult<Vec<Organization>> {
        self.http.get("/api/superadmin/organizaciones").await
    }

    /// Move an organisation to another plan without billing
    pub async fn change_plan(
        &self,
        organization_id: &str,
        plan_id: &str,
    ) -> ClientResult<MessageResponse> {
        let path = format!("/api/superadmin/organizaciones/{}/plan", segment(organization_id));
        let request = ChangePlanRequest {
            plan_id: plan_id.to_string(),
        };
        let response = self.http.put(&path, &request).await?;
        tracing::info!(organization_id, plan_id, "Organization plan changed");
        Ok(response)
    }
}
