//! Backend endpoint table.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::{
    error::Result,
    models::{requests::StepContentRequest, ScoreRequest},
    params::{CreatePlan, RegisterUser},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request against the backend, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Route {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Route {
    fn get(path: String) -> Self {
        Self {
            method: Method::Get,
            path,
            body: None,
        }
    }

    fn post<B: Serialize>(path: &str, body: &B) -> Result<Self> {
        Ok(Self {
            method: Method::Post,
            path: path.to_string(),
            body: Some(serde_json::to_value(body)?),
        })
    }

    pub(crate) fn register(params: &RegisterUser) -> Result<Self> {
        Self::post("users/", params)
    }

    pub(crate) fn user(user_id: u64) -> Self {
        Self::get(format!("users/{user_id}"))
    }

    pub(crate) fn create_plan(params: &CreatePlan) -> Result<Self> {
        Self::post("study_plans/", params)
    }

    pub(crate) fn list_plans(user_id: u64) -> Self {
        Self::get(format!("study_plans/{user_id}"))
    }

    pub(crate) fn plan(user_id: u64, plan_id: u64) -> Self {
        Self::get(format!("study_plans/{user_id}/{plan_id}"))
    }

    pub(crate) fn delete_plan(plan_id: u64) -> Self {
        Self {
            method: Method::Delete,
            path: format!("study_plans/{plan_id}"),
            body: None,
        }
    }

    pub(crate) fn generate_quiz(step_content: &str) -> Result<Self> {
        Self::post("generate_quiz", &StepContentRequest { step_content })
    }

    pub(crate) fn score_quiz(request: &ScoreRequest) -> Result<Self> {
        Self::post("score_quiz", request)
    }

    pub(crate) fn fallback_material(step_content: &str) -> Result<Self> {
        Self::post("fallback_material", &StepContentRequest { step_content })
    }
}
