use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityName, EntityTrait, QueryFilter,
    sea_query::{Expr, Query},
};
use tracing::info;

use crate::{
    db::ConnectionFactory,
    entities::movie,
    error::{AppError, AppResult},
    models::{InsertOutcome, MovieInput},
};

/// Record access for the `movies` table. Each operation runs one statement on
/// its own connection and releases it whether or not the statement succeeded.
#[derive(Clone)]
pub struct MovieStore {
    connections: ConnectionFactory,
}

impl MovieStore {
    pub fn new(connections: ConnectionFactory) -> Self {
        Self { connections }
    }

    pub async fn list(&self) -> AppResult<Vec<movie::Model>> {
        let db = self.connections.open().await?;
        let result = movie::Entity::find().all(&db).await;
        self.connections.release(db).await;
        Ok(result?)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        let db = self.connections.open().await?;
        let result = movie::Entity::find_by_id(id).one(&db).await;
        self.connections.release(db).await;
        result?.ok_or(AppError::NotFound)
    }

    pub async fn create(&self, input: &MovieInput) -> AppResult<InsertOutcome> {
        let stmt = Query::insert()
            .into_table(movie::Entity.table_ref())
            .columns([
                movie::Column::Title,
                movie::Column::Overview,
                movie::Column::PosterPath,
                movie::Column::TrailerUrl,
                movie::Column::FullMovieUrl,
                movie::Column::ReleaseDate,
                movie::Column::VoteAverage,
            ])
            .values([
                Expr::value(input.title.clone()),
                Expr::value(input.overview.clone()),
                Expr::value(input.poster_path.clone()),
                Expr::value(input.trailer_url.clone()),
                Expr::value(input.full_movie_url.clone()),
                Expr::value(input.release_date.clone()),
                Expr::value(input.vote_average),
            ])?
            .to_owned();

        let db = self.connections.open().await?;
        let result = db.execute(db.get_database_backend().build(&stmt)).await;
        self.connections.release(db).await;

        let result = result?;
        let outcome = InsertOutcome {
            last_insert_id: result.last_insert_id(),
            rows_affected: result.rows_affected(),
        };
        info!(id = outcome.last_insert_id, "movie created");
        Ok(outcome)
    }

    /// Replaces every updatable column of the row. Fields missing from `input`
    /// are written as NULL.
    pub async fn update(&self, id: i32, input: &MovieInput) -> AppResult<()> {
        let db = self.connections.open().await?;
        let result = movie::Entity::update_many()
            .col_expr(movie::Column::Title, Expr::value(input.title.clone()))
            .col_expr(movie::Column::Overview, Expr::value(input.overview.clone()))
            .col_expr(movie::Column::PosterPath, Expr::value(input.poster_path.clone()))
            .col_expr(movie::Column::ReleaseDate, Expr::value(input.release_date.clone()))
            .col_expr(movie::Column::VoteAverage, Expr::value(input.vote_average))
            .filter(movie::Column::Id.eq(id))
            .exec(&db)
            .await;
        self.connections.release(db).await;

        if result?.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        info!(id, "movie updated");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let db = self.connections.open().await?;
        let result = movie::Entity::delete_by_id(id).exec(&db).await;
        self.connections.release(db).await;

        if result?.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        info!(id, "movie deleted");
        Ok(())
    }
}
