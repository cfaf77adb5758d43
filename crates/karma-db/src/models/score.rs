//! Score row model

use sqlx::FromRow;

use karma_core::{ScoreRecord, Snowflake};

/// Row in the `scores` table
#[derive(Debug, Clone, FromRow)]
pub struct ScoreModel {
    pub community_id: i64,
    pub user_id: i64,
    pub points: i64,
}

impl From<ScoreModel> for ScoreRecord {
    fn from(model: ScoreModel) -> Self {
        ScoreRecord {
            community_id: Snowflake::new(model.community_id),
            user_id: Snowflake::new(model.user_id),
            points: model.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_to_entity() {
        let model = ScoreModel {
            community_id: 1,
            user_id: 2,
            points: -7,
        };
        let record = ScoreRecord::from(model);
        assert_eq!(record.community_id, Snowflake::new(1));
        assert_eq!(record.user_id, Snowflake::new(2));
        assert_eq!(record.points, -7);
    }
}
