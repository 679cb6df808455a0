use common::voting::{SETTING_APPROVAL_RATIO, SETTING_MIN_VOTES, SETTING_NOTIFY_ARTIST};
use sea_orm::*;
use tracing::info;

use crate::entity::setting;

/// Default voting settings seeded on startup. Existing rows are left alone,
/// so operator overrides survive restarts.
const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    (SETTING_MIN_VOTES, "10"),
    (SETTING_APPROVAL_RATIO, "0.6"),
    (SETTING_NOTIFY_ARTIST, "true"),
];

/// Seed the `setting` table with voting defaults.
pub async fn seed_default_settings(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for &(key, value) in DEFAULT_SETTINGS {
        let model = setting::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
        };

        let result = setting::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(setting::Column::Key)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new settings", inserted);
    }

    Ok(())
}
