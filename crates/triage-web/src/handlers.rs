//! HTTP处理器

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use triage_core::{CaretakerObservation, GeoPoint, SymptomCategory, TriageAnswer, VitalsRecord};
use triage_database::DatabaseQueries;

use crate::error::ApiResult;
use crate::server::AppState;

/// API根路径处理器
pub async fn api_root() -> impl IntoResponse {
    Json(json!({
        "service": "Health Triage API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/health",
            "check_health": "/check_health",
            "health_history": "/health_history",
            "triage_questions": "/get_triage_questions",
            "classify_emergency": "/classify_emergency",
            "detect_symptom": "/detect_symptom",
            "advice": "/advice/{status}",
            "find_hospitals": "/find_hospitals"
        }
    }))
}

/// 健康检查处理器
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 生命体征评分：计算评分和建议，并保存记录
pub async fn check_health(
    State(state): State<AppState>,
    payload: Result<Json<VitalsRecord>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(record) = payload?;

    let result = triage_engine::score_vitals(&record);
    let advice = triage_engine::advice_for(result.status);

    let record_id = DatabaseQueries::new(&state.db)
        .insert_health_record(&record, &result)
        .await?;

    info!("Health check {} scored {} ({})", record_id, result.score, result.status);

    Ok(Json(json!({
        "success": true,
        "score": result.score,
        "status": result.status,
        "advice": advice,
        "record_id": record_id,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQueryParams {
    pub limit: Option<i64>,
}

/// 历史记录查询，按时间倒序
pub async fn health_history(
    State(state): State<AppState>,
    params: Result<Query<HistoryQueryParams>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(params) = params?;
    let limit = params
        .limit
        .unwrap_or(state.history_limit)
        .clamp(1, state.history_limit);
    debug!("Getting health history, limit {}", limit);

    let history = DatabaseQueries::new(&state.db)
        .recent_health_records(limit)
        .await?;

    Ok(Json(json!({
        "success": true,
        "history": history
    })))
}

/// 分诊问题请求，其余照护者字段忽略
#[derive(Debug, Deserialize)]
pub struct TriageQuestionsRequest {
    #[serde(default)]
    pub symptom: Option<SymptomCategory>,
}

/// 获取分诊问题
pub async fn get_triage_questions(
    payload: Result<Json<TriageQuestionsRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    let category = request.symptom.unwrap_or_default();
    let questions = triage_engine::questions_for(category);

    debug!("Serving {} triage questions for {}", questions.len(), category);

    Ok(Json(json!({
        "success": true,
        "symptom": category,
        "questions": questions
    })))
}

/// 紧急程度分级请求，字段与前端会话对象一致
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    #[serde(default)]
    pub symptom: Option<SymptomCategory>,
    #[serde(default)]
    pub is_caretaker: bool,
    #[serde(default)]
    pub caretaker_data: Option<CaretakerObservation>,
    #[serde(default)]
    pub triage_answers: Vec<TriageAnswer>,
}

/// 紧急程度分级
pub async fn classify_emergency(
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    let category = request.symptom.unwrap_or_default();

    let result = triage_engine::classify(
        category,
        &request.triage_answers,
        request.is_caretaker,
        request.caretaker_data.as_ref(),
    );

    info!(
        "Classified {} with {} answers as {:?}",
        category,
        request.triage_answers.len(),
        result.severity
    );

    Ok(Json(json!({
        "success": true,
        "symptom": category,
        "severity": result.severity,
        "instructions": result.instructions,
        "instruction_set": result.instruction_set
    })))
}

#[derive(Debug, Deserialize)]
pub struct DetectSymptomRequest {
    #[serde(default)]
    pub text: String,
}

/// 从自由文本识别症状类别
pub async fn detect_symptom(
    payload: Result<Json<DetectSymptomRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    let category = triage_engine::detect_category(&request.text);

    Ok(Json(json!({
        "success": true,
        "symptom": category
    })))
}

/// 按状态标签获取建议
pub async fn advice(Path(status): Path<String>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "status": status,
        "advice": triage_engine::advice_for_label(&status)
    }))
}

/// 查询附近医疗机构
pub async fn find_hospitals(
    State(state): State<AppState>,
    payload: Result<Json<GeoPoint>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(origin) = payload?;
    origin.validate()?;

    let hospitals = state.facilities.nearby(origin).await?;

    Ok(Json(json!({
        "success": true,
        "source": state.facilities.name(),
        "hospitals": hospitals
    })))
}
