//! Building leaderboard - residents ranked by monthly points.

use crate::entities::{User, user};
use crate::errors::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// One row of the building ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Ranked user
    pub user_id: i64,
    /// Display name
    pub name: String,
    /// Apartment number inside the building
    pub apartment_number: String,
    /// Lifetime points
    pub total_points: i64,
    /// Current-month points the ranking is based on
    pub monthly_points: i64,
    /// 1-based position
    pub rank: usize,
    /// Whether this row is the viewing user
    pub is_current_user: bool,
}

/// Ranks users by monthly points, descending. Ties keep their input order.
#[must_use]
pub fn rank_users(users: &[user::Model], current_user_id: i64) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&user::Model> = users.iter().collect();
    sorted.sort_by(|a, b| b.monthly_points.cmp(&a.monthly_points));

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, u)| LeaderboardEntry {
            user_id: u.id,
            name: u.name.clone(),
            apartment_number: u.apartment_number.clone(),
            total_points: u.total_points,
            monthly_points: u.monthly_points,
            rank: index + 1,
            is_current_user: u.id == current_user_id,
        })
        .collect()
}

/// Loads and ranks all residents of one building.
pub async fn building_leaderboard(
    db: &DatabaseConnection,
    building_id: i64,
    current_user_id: i64,
) -> Result<Vec<LeaderboardEntry>> {
    let residents = User::find()
        .filter(user::Column::BuildingId.eq(building_id))
        .order_by_desc(user::Column::MonthlyPoints)
        .all(db)
        .await?;

    Ok(rank_users(&residents, current_user_id))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::profile::sync_user_points;
    use crate::test_utils::*;

    #[test]
    fn test_rank_users_orders_by_monthly_points() {
        let users = vec![
            user_model(1, "Ali", 30),
            user_model(2, "Ayşe", 90),
            user_model(3, "Mehmet", 60),
        ];

        let ranking = rank_users(&users, 3);
        assert_eq!(ranking[0].name, "Ayşe");
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[1].name, "Mehmet");
        assert!(ranking[1].is_current_user);
        assert_eq!(ranking[2].name, "Ali");
        assert_eq!(ranking[2].rank, 3);
    }

    #[test]
    fn test_rank_users_ties_keep_input_order() {
        let users = vec![
            user_model(1, "Ali", 50),
            user_model(2, "Ayşe", 50),
        ];

        let ranking = rank_users(&users, 0);
        assert_eq!(ranking[0].user_id, 1);
        assert_eq!(ranking[1].user_id, 2);
    }

    #[test]
    fn test_rank_users_empty() {
        assert!(rank_users(&[], 1).is_empty());
    }

    #[tokio::test]
    async fn test_building_leaderboard_scopes_to_building() -> Result<()> {
        let db = setup_test_db().await?;
        let ali = create_test_user(&db, "Ali").await?;
        let ayse = create_test_user(&db, "Ayşe").await?;
        let stranger = create_user_in_building(&db, "Zeynep", 99).await?;

        sync_user_points(&db, ali.id, 30).await?;
        sync_user_points(&db, ayse.id, 80).await?;
        sync_user_points(&db, stranger.id, 999).await?;

        let ranking = building_leaderboard(&db, ali.building_id, ali.id).await?;
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].name, "Ayşe");
        assert_eq!(ranking[1].name, "Ali");
        assert!(ranking[1].is_current_user);

        Ok(())
    }
}
