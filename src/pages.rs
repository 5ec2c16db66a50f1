use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    AppState,
    entities::movie,
    error::{AppError, AppResult},
    models::{MovieInput, parse_id, parse_vote_average},
    templates,
};

/// The admin form's fields, exactly as the browser submits them.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: String,
    #[serde(default)]
    pub trailer_url: String,
    #[serde(default)]
    pub full_movie_url: String,
}

impl MovieForm {
    pub fn to_input(&self) -> AppResult<MovieInput> {
        let vote_average = parse_vote_average(&self.vote_average)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());

        Ok(MovieInput {
            title: Some(self.title.clone()),
            overview: Some(self.overview.clone()),
            poster_path: Some(self.poster_path.clone()),
            release_date: Some(self.release_date.clone()),
            vote_average,
            trailer_url: optional(&self.trailer_url),
            full_movie_url: optional(&self.full_movie_url),
        })
    }
}

impl From<&movie::Model> for MovieForm {
    fn from(m: &movie::Model) -> Self {
        Self {
            id: Some(m.id.to_string()),
            title: m.title.clone(),
            overview: m.overview.clone().unwrap_or_default(),
            poster_path: m.poster_path.clone().unwrap_or_default(),
            release_date: m
                .release_date
                .as_deref()
                .map(templates::date_input_value)
                .unwrap_or_default(),
            vote_average: m.vote_average.map(|v| v.to_string()).unwrap_or_default(),
            trailer_url: m.trailer_url.clone().unwrap_or_default(),
            full_movie_url: m.full_movie_url.clone().unwrap_or_default(),
        }
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let movies = match state.store.list().await {
        Ok(movies) => movies,
        Err(err) => {
            warn!(error = %err, "failed to fetch movies");
            Vec::new()
        },
    };
    Html(templates::movies_page(&movies))
}

pub async fn new_movie() -> Html<String> {
    Html(templates::movie_form_page(&MovieForm::default()))
}

pub async fn edit_movie(State(state): State<Arc<AppState>>, Path(raw): Path<String>) -> Response {
    let result: AppResult<movie::Model> = async {
        let id = parse_id(&raw)?;
        state.store.get(id).await
    }
    .await;

    match result {
        Ok(movie) => Html(templates::movie_form_page(&MovieForm::from(&movie))).into_response(),
        Err(err) => {
            warn!(id = %raw, error = %err, "failed to load movie for editing");
            Redirect::to("/").into_response()
        },
    }
}

pub async fn save_movie(State(state): State<Arc<AppState>>, Form(form): Form<MovieForm>) -> Response {
    let result: AppResult<()> = async {
        match form.id.as_deref() {
            Some(raw) => {
                let id = parse_id(raw)?;
                state.store.update(id, &form.to_input()?).await
            },
            None => state.store.create(&form.to_input()?).await.map(|_| ()),
        }
    }
    .await;

    match result {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => {
            let action = if form.id.is_some() { "update" } else { "add" };
            warn!(id = ?form.id, error = %err, "failed to {action} movie");
            Html(templates::movie_form_page(&form)).into_response()
        },
    }
}

pub async fn delete_movie(State(state): State<Arc<AppState>>, Path(raw): Path<String>) -> Redirect {
    let result: AppResult<()> = async {
        let id = parse_id(&raw)?;
        state.store.delete(id).await
    }
    .await;

    if let Err(err) = result {
        warn!(id = %raw, error = %err, "failed to delete movie");
    }
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_urls_become_null() {
        let form = MovieForm {
            title: "Heat".into(),
            vote_average: " 8 ".into(),
            ..Default::default()
        };
        let input = form.to_input().unwrap();
        assert_eq!(input.title.as_deref(), Some("Heat"));
        assert_eq!(input.overview.as_deref(), Some(""));
        assert_eq!(input.vote_average, Some(8.0));
        assert_eq!(input.trailer_url, None);
    }

    #[test]
    fn non_numeric_vote_is_rejected() {
        let form = MovieForm { vote_average: "ten".into(), ..Default::default() };
        assert!(matches!(form.to_input(), Err(AppError::Internal(_))));
    }
}
