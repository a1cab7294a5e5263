use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::calendar;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::export::{self, ExportFormat};
use crate::html;
use crate::store::TaskStore;
use crate::types::{NewTask, Priority, Task, TaskUpdate};
use crate::views::{self, PriorityCounts};

/// Where handlers read the current time from
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    #[cfg_attr(not(test), allow(dead_code))]
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Application state shared across requests
pub struct AppState {
    pub store: RwLock<TaskStore>,
    pub config: Config,
    pub clock: Clock,
}

impl AppState {
    pub fn new(store: TaskStore, config: Config, clock: Clock) -> Self {
        Self {
            store: RwLock::new(store),
            config,
            clock,
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

type SharedState = Arc<AppState>;

/// Start the web server
pub async fn serve(config: Config, store: TaskStore) -> anyhow::Result<()> {
    let addr = config.addr();
    let state = Arc::new(AppState::new(store, config, Clock::System));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(url = %format!("http://{}", addr), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/login") }))
        .route("/login", get(login_page).post(auth_submit))
        .route("/register", get(register_page).post(auth_submit))
        .route("/dashboard", get(dashboard_handler))
        .route("/calendar", get(calendar_handler))
        .route("/timetable", get(timetable_handler))
        .route("/exports", get(exports_handler))
        .route("/exports/download", get(download_handler))
        .route("/profile", get(profile_handler).post(profile_submit))
        .route("/tasks", post(create_task_form))
        .route("/tasks/{id}/update", post(update_task_form))
        .route("/tasks/{id}/toggle", post(toggle_task_form))
        .route("/tasks/{id}/delete", post(delete_task_form))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/toggle", post(toggle_task))
        .route("/api/tasks/{id}/reschedule", post(reschedule_task))
        .route("/api/views/upcoming", get(upcoming_view))
        .route("/api/views/day", get(day_view))
        .route("/api/views/week", get(week_view))
        .route("/api/views/counts", get(counts_view))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ========== Pages ==========

async fn login_page() -> Html<String> {
    Html(html::render_login().into_string())
}

async fn register_page() -> Html<String> {
    Html(html::render_register().into_string())
}

#[derive(Debug, Deserialize)]
struct AuthForm {
    #[serde(default)]
    email: String,
}

/// There are no credentials to check: every submission lands on the dashboard.
async fn auth_submit(Form(form): Form<AuthForm>) -> Redirect {
    debug!(email = %form.email, "Sign-in form submitted");
    Redirect::to("/dashboard")
}

async fn dashboard_handler(State(state): State<SharedState>) -> Html<String> {
    let store = state.store.read().await;
    let markup = html::render_dashboard(
        store.tasks(),
        store.user(),
        state.now(),
        state.config.horizon_days,
    );
    Html(markup.into_string())
}

#[derive(Debug, Deserialize)]
struct DateQuery {
    date: Option<String>,
}

async fn calendar_handler(
    State(state): State<SharedState>,
    Query(query): Query<DateQuery>,
) -> Html<String> {
    let now = state.now();
    let selected = calendar::selected_date(query.date.as_deref(), now.date());
    let store = state.store.read().await;
    let markup = html::render_calendar(store.tasks(), store.user(), selected, now);
    Html(markup.into_string())
}

async fn timetable_handler(State(state): State<SharedState>) -> Html<String> {
    let store = state.store.read().await;
    let markup = html::render_timetable(store.classes(), store.tasks(), store.user());
    Html(markup.into_string())
}

async fn exports_handler(State(state): State<SharedState>) -> Html<String> {
    let store = state.store.read().await;
    Html(html::render_exports(store.tasks(), store.user(), None).into_string())
}

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    format: Option<String>,
}

async fn download_handler(
    State(state): State<SharedState>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<Response> {
    let format: ExportFormat = match query.format.as_deref() {
        Some(raw) => raw.parse()?,
        None => ExportFormat::default(),
    };
    let store = state.store.read().await;

    match export::export(store.tasks(), format, state.now().date()) {
        Ok(file) => {
            info!(filename = %file.filename, tasks = store.len(), "Export generated");
            let disposition = format!("attachment; filename=\"{}\"", file.filename);
            Ok((
                [
                    (header::CONTENT_TYPE, file.content_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                file.body,
            )
                .into_response())
        }
        Err(e) => {
            warn!(format = %format, error = %e, "Export rejected");
            let markup = html::render_exports(store.tasks(), store.user(), Some(&e.to_string()));
            Ok((StatusCode::BAD_REQUEST, Html(markup.into_string())).into_response())
        }
    }
}

async fn profile_handler(State(state): State<SharedState>) -> Html<String> {
    let store = state.store.read().await;
    Html(html::render_profile(store.user(), None).into_string())
}

#[derive(Debug, Deserialize)]
struct ProfileForm {
    name: String,
    email: String,
}

async fn profile_submit(
    State(state): State<SharedState>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let mut store = state.store.write().await;
    let (status, notice) = match store.update_profile(&form.name, &form.email) {
        Ok(user) => {
            info!(user = %user.id, "Profile updated");
            (StatusCode::OK, "Profile updated successfully".to_string())
        }
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()),
    };
    let markup = html::render_profile(store.user(), Some(&notice));
    (status, Html(markup.into_string())).into_response()
}

// ========== Form actions ==========

/// Fields posted by the add/edit task form
#[derive(Debug, Deserialize)]
struct TaskForm {
    title: String,
    #[serde(default)]
    description: String,
    deadline: String,
    #[serde(default)]
    priority: Priority,
    back: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BackForm {
    back: Option<String>,
}

/// Accepts `datetime-local` values with or without seconds, or a bare date
fn parse_deadline(raw: &str) -> AppResult<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .ok_or_else(|| AppError::BadRequest(format!("invalid deadline: {raw}")))
}

/// Only same-site paths are followed after a form post
fn back_to(back: Option<&str>) -> Redirect {
    match back {
        Some(path) if is_local_path(path) => Redirect::to(path),
        _ => Redirect::to("/dashboard"),
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.chars().any(char::is_control)
}

async fn create_task_form(
    State(state): State<SharedState>,
    Form(form): Form<TaskForm>,
) -> AppResult<Redirect> {
    let new = NewTask {
        title: form.title,
        description: form.description,
        deadline: parse_deadline(&form.deadline)?,
        priority: form.priority,
    };
    let mut store = state.store.write().await;
    let task = store.add(new, state.now())?;
    info!(id = %task.id, "Task created");
    Ok(back_to(form.back.as_deref()))
}

async fn update_task_form(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<TaskForm>,
) -> AppResult<Redirect> {
    let update = TaskUpdate {
        title: Some(form.title),
        description: Some(form.description),
        deadline: Some(parse_deadline(&form.deadline)?),
        priority: Some(form.priority),
        completed: None,
    };
    state.store.write().await.update(&id, update, state.now())?;
    Ok(back_to(form.back.as_deref()))
}

async fn toggle_task_form(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<BackForm>,
) -> AppResult<Redirect> {
    state.store.write().await.toggle_complete(&id)?;
    Ok(back_to(form.back.as_deref()))
}

async fn delete_task_form(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<BackForm>,
) -> AppResult<Redirect> {
    state.store.write().await.delete(&id)?;
    info!(id = %id, "Task deleted");
    Ok(back_to(form.back.as_deref()))
}

// ========== JSON API ==========

async fn list_tasks(State(state): State<SharedState>) -> Json<Vec<Task>> {
    Json(state.store.read().await.tasks().to_vec())
}

async fn create_task(
    State(state): State<SharedState>,
    Json(new): Json<NewTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let mut store = state.store.write().await;
    let task = store.add(new, state.now())?.clone();
    info!(id = %task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    let store = state.store.read().await;
    Ok(Json(store.get(&id)?.clone()))
}

async fn update_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(update): Json<TaskUpdate>,
) -> AppResult<Json<Task>> {
    let mut store = state.store.write().await;
    let task = store.update(&id, update, state.now())?.clone();
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.store.write().await.delete(&id)?;
    info!(id = %id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    let mut store = state.store.write().await;
    Ok(Json(store.toggle_complete(&id)?.clone()))
}

/// Drop target of a drag: an exact deadline, or a day that keeps the time of day
#[derive(Debug, Deserialize)]
struct RescheduleRequest {
    deadline: Option<NaiveDateTime>,
    date: Option<NaiveDate>,
}

async fn reschedule_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<RescheduleRequest>,
) -> AppResult<Json<Task>> {
    let now = state.now();
    let mut store = state.store.write().await;
    let task = match (req.deadline, req.date) {
        (Some(deadline), _) => store.reschedule(&id, deadline, now)?,
        (None, Some(date)) => store.move_to_day(&id, date, now)?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "either deadline or date is required".to_string(),
            ))
        }
    };
    info!(id = %task.id, deadline = %task.deadline, "Task rescheduled");
    Ok(Json(task.clone()))
}

#[derive(Debug, Deserialize)]
struct UpcomingQuery {
    days: Option<i64>,
}

async fn upcoming_view(
    State(state): State<SharedState>,
    Query(query): Query<UpcomingQuery>,
) -> Json<Vec<Task>> {
    let days = query.days.unwrap_or(state.config.horizon_days);
    let store = state.store.read().await;
    let due = views::upcoming(store.tasks(), state.now(), days);
    Json(due.into_iter().cloned().collect())
}

async fn day_view(
    State(state): State<SharedState>,
    Query(query): Query<DateQuery>,
) -> Json<Vec<Task>> {
    let day = calendar::selected_date(query.date.as_deref(), state.now().date());
    let store = state.store.read().await;
    Json(views::tasks_on_date(store.tasks(), day).into_iter().cloned().collect())
}

async fn week_view(State(state): State<SharedState>) -> AppResult<Json<serde_json::Value>> {
    let store = state.store.read().await;
    let grid = views::group_by_weekday(store.tasks());
    let value = serde_json::to_value(&grid).map_err(anyhow::Error::from)?;
    Ok(Json(value))
}

#[derive(Debug, Serialize)]
struct CountsResponse {
    #[serde(flatten)]
    counts: PriorityCounts,
    summary: views::Summary,
}

async fn counts_view(State(state): State<SharedState>) -> Json<CountsResponse> {
    let store = state.store.read().await;
    Json(CountsResponse {
        counts: views::priority_counts(store.tasks()),
        summary: views::summary(store.tasks()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn make_task(id: &str, title: &str, deadline: NaiveDateTime, priority: Priority) -> Task {
        let created = NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            deadline,
            priority,
            completed: false,
            created_at: created,
            updated_at: created,
        }
    }

    fn setup_state() -> SharedState {
        let tasks = vec![
            make_task("t1", "Physics Lab Report", now() + chrono::Duration::days(1), Priority::Urgent),
            make_task("t2", "English Essay", now() + chrono::Duration::days(10), Priority::Medium),
            make_task("t3", "History Slides", now() - chrono::Duration::days(1), Priority::High),
        ];
        let store = TaskStore::new(tasks, data::sample_classes(), data::current_user());
        Arc::new(AppState::new(store, Config::default(), Clock::Fixed(now())))
    }

    async fn send(state: &SharedState, request: Request<Body>) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
        let response = router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, body, headers)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    fn post_form(uri: &str, form: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    // ========== helper tests ==========

    #[test]
    fn test_parse_deadline_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 20)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parse_deadline("2025-05-20T14:30").unwrap(), expected);
        assert_eq!(parse_deadline("2025-05-20T14:30:00").unwrap(), expected);
        assert_eq!(
            parse_deadline("2025-05-20").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 20).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_deadline("next friday").is_err());
    }

    // ========== page tests ==========

    #[tokio::test]
    async fn test_root_redirects_to_login() {
        let state = setup_state();
        let (status, _, headers) = send(&state, get("/")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_login_always_redirects_to_dashboard() {
        let state = setup_state();
        let (status, _, headers) =
            send(&state, post_form("/login", "email=a%40b.edu&password=wrong")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let state = setup_state();
        let (status, body, _) = send(&state, get("/dashboard")).await;
        let html = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Physics Lab Report"));
        assert!(html.contains("Overdue: May 14, 2025"));
    }

    #[tokio::test]
    async fn test_calendar_page_with_date() {
        let state = setup_state();
        let (status, body, _) = send(&state, get("/calendar?date=2025-05-16")).await;
        let html = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Tasks for May 16, 2025"));
        assert!(html.contains("Physics Lab Report"));
    }

    #[tokio::test]
    async fn test_timetable_page() {
        let state = setup_state();
        let (status, body, _) = send(&state, get("/timetable")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("Art History"));
    }

    // ========== export tests ==========

    #[tokio::test]
    async fn test_download_csv() {
        let state = setup_state();
        let (status, body, headers) = send(&state, get("/exports/download?format=csv")).await;
        let csv = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"tasks-export-2025-05-15.csv\""
        );
        assert!(csv.starts_with("Title,Description,Deadline,Priority,Status\n"));
        assert!(csv.contains(r#""Physics Lab Report","","2025-05-16","urgent","Pending""#));
    }

    #[tokio::test]
    async fn test_download_pdf_rejected() {
        let state = setup_state();
        let (status, body, _) = send(&state, get("/exports/download?format=pdf")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body)
            .unwrap()
            .contains("PDF export would be implemented with a backend service"));
    }

    // ========== form action tests ==========

    #[tokio::test]
    async fn test_form_create_and_toggle() {
        let state = setup_state();
        let (status, _, headers) = send(
            &state,
            post_form(
                "/tasks",
                "title=Read+chapter+5&description=&deadline=2025-05-18T09%3A00&priority=high&back=%2Fcalendar%3Fdate%3D2025-05-18",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/calendar?date=2025-05-18");

        let id = {
            let store = state.store.read().await;
            assert_eq!(store.len(), 4);
            let task = &store.tasks()[0];
            assert_eq!(task.title, "Read chapter 5");
            assert_eq!(task.priority, Priority::High);
            task.id.clone()
        };

        let (status, _, _) = send(&state, post_form(&format!("/tasks/{id}/toggle"), "back=%2Fdashboard")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(state.store.read().await.get(&id).unwrap().completed);
    }

    #[tokio::test]
    async fn test_form_back_ignores_foreign_urls() {
        let state = setup_state();
        let (_, _, headers) = send(&state, post_form("/tasks/t1/toggle", "back=https%3A%2F%2Fevil.example")).await;
        assert_eq!(headers[header::LOCATION], "/dashboard");
    }

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("/calendar?date=2025-05-18"));
        assert!(is_local_path("/caf\u{e9}"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("https://evil.example"));
        assert!(!is_local_path("/a\nb"));
        assert!(!is_local_path("/a\rLocation: x"));
    }

    #[tokio::test]
    async fn test_form_back_with_line_break_falls_back() {
        let state = setup_state();
        let (status, _, headers) = send(
            &state,
            post_form(
                "/tasks",
                "title=Quiz&deadline=2025-05-18T09%3A00&priority=low&back=%2Fa%0Ab",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/dashboard");
        assert_eq!(state.store.read().await.len(), 4);
    }

    #[tokio::test]
    async fn test_form_delete() {
        let state = setup_state();
        let (status, _, _) = send(&state, post_form("/tasks/t2/delete", "")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(state.store.read().await.get("t2").is_err());
    }

    #[tokio::test]
    async fn test_profile_update() {
        let state = setup_state();
        let (status, body, _) = send(&state, post_form("/profile", "name=Jane+Roe&email=jane%40uni.edu")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("Profile updated successfully"));
        assert_eq!(state.store.read().await.user().name, "Jane Roe");
    }

    // ========== API tests ==========

    #[tokio::test]
    async fn test_api_list_tasks() {
        let state = setup_state();
        let (status, body, _) = send(&state, get("/api/tasks")).await;
        let tasks: Vec<Task> = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, "t1");
    }

    #[tokio::test]
    async fn test_api_create_task() {
        let state = setup_state();
        let (status, body, _) = send(
            &state,
            post_json(
                "/api/tasks",
                r#"{"title":"Quiz prep","deadline":"2025-05-17T08:00:00","priority":"urgent"}"#,
            ),
        )
        .await;
        let task: Task = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task.title, "Quiz prep");
        assert_eq!(task.created_at, now());
        assert_eq!(state.store.read().await.len(), 4);
    }

    #[tokio::test]
    async fn test_api_create_blank_title() {
        let state = setup_state();
        let (status, body, _) = send(
            &state,
            post_json("/api/tasks", r#"{"title":"  ","deadline":"2025-05-17T08:00:00"}"#),
        )
        .await;
        let error: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "title is required");
    }

    #[tokio::test]
    async fn test_api_get_missing_task() {
        let state = setup_state();
        let (status, _, _) = send(&state, get("/api/tasks/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_update_task() {
        let state = setup_state();
        let request = Request::builder()
            .method("PUT")
            .uri("/api/tasks/t2")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"priority":"high","completed":true}"#))
            .unwrap();
        let (status, body, _) = send(&state, request).await;
        let task: Task = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(task.priority, Priority::High);
        assert!(task.completed);
        assert_eq!(task.updated_at, now());
    }

    #[tokio::test]
    async fn test_api_delete_task() {
        let state = setup_state();
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/tasks/t3")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/tasks/t3")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_toggle_keeps_updated_at() {
        let state = setup_state();
        let (status, body, _) = send(&state, post_json("/api/tasks/t1/toggle", "")).await;
        let task: Task = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(task.completed);
        assert_eq!(task.updated_at, task.created_at);
    }

    #[tokio::test]
    async fn test_api_reschedule_to_day() {
        let state = setup_state();
        let (status, body, _) =
            send(&state, post_json("/api/tasks/t1/reschedule", r#"{"date":"2025-05-20"}"#)).await;
        let task: Task = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(task.deadline.to_string(), "2025-05-20 10:00:00");
        assert_eq!(task.updated_at, now());
    }

    #[tokio::test]
    async fn test_api_reschedule_needs_target() {
        let state = setup_state();
        let (status, _, _) = send(&state, post_json("/api/tasks/t1/reschedule", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_upcoming_view() {
        let state = setup_state();
        let (status, body, _) = send(&state, get("/api/views/upcoming")).await;
        let tasks: Vec<Task> = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        // overdue first, the 10-day essay is beyond the 7-day horizon
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t3", "t1"]);

        let (_, body, _) = send(&state, get("/api/views/upcoming?days=14")).await;
        let tasks: Vec<Task> = serde_json::from_slice(&body).unwrap();
        assert_eq!(tasks.len(), 3);
    }

    #[tokio::test]
    async fn test_api_day_and_week_views() {
        let state = setup_state();
        let (_, body, _) = send(&state, get("/api/views/day?date=2025-05-16")).await;
        let tasks: Vec<Task> = serde_json::from_slice(&body).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "t1");

        // 2025-05-16 10:00 is a Friday morning
        let (_, body, _) = send(&state, get("/api/views/week")).await;
        let week: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(week["Friday"]["morning"][0]["id"], "t1");
    }

    #[tokio::test]
    async fn test_api_counts_view() {
        let state = setup_state();
        let (_, body, _) = send(&state, get("/api/views/counts")).await;
        let counts: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(counts["urgent"], 1);
        assert_eq!(counts["high"], 1);
        assert_eq!(counts["low"], 0);
        assert_eq!(counts["summary"]["total"], 3);
    }
}
