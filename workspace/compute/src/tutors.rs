use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, instrument};

use model::entities::{prelude::Tutor, tutor};

use crate::error::Result;

/// Resolves the tutor record attached to a login account.
#[instrument(skip(db))]
pub async fn find_tutor_id(db: &DatabaseConnection, account_id: i32) -> Result<Option<i32>> {
    let tutor = Tutor::find()
        .filter(tutor::Column::AccountId.eq(account_id))
        .one(db)
        .await?;
    debug!(found = tutor.is_some(), "Tutor lookup finished");
    Ok(tutor.map(|t| t.id))
}
