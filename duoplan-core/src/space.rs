//! Couple-space lifecycle: create, join with a code, leave.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{DuoplanError, DuoplanResult};
use crate::model::CoupleSpace;
use crate::store::SpaceStore;

/// Create a space owned by `user_id`. The space id is the creator's id and
/// doubles as the join code.
pub async fn create_space(
    store: &dyn SpaceStore,
    user_id: &str,
    now: DateTime<Utc>,
) -> DuoplanResult<CoupleSpace> {
    if let Some(existing) = current_space(store, user_id).await? {
        return Err(DuoplanError::AlreadyMember(existing.id));
    }

    let space = CoupleSpace::new(user_id, user_id, now);
    store.write_space(&space).await?;
    store.write_membership(user_id, Some(&space.id)).await?;

    info!(space_id = %space.id, "created couple space");
    Ok(space)
}

pub async fn join_space(
    store: &dyn SpaceStore,
    code: &str,
    user_id: &str,
) -> DuoplanResult<CoupleSpace> {
    let Some(mut space) = store.read_space(code).await? else {
        return Err(DuoplanError::SpaceNotFound(code.to_string()));
    };

    if space.creator_id == user_id {
        return Err(DuoplanError::AlreadyMember(space.id));
    }
    if let Some(partner_id) = &space.partner_id {
        // A partner who left keeps their slot but not their membership
        let rejoining = partner_id == user_id
            && store.read_membership(user_id).await?.as_deref() == Some(space.id.as_str());
        return Err(if rejoining {
            DuoplanError::AlreadyMember(space.id)
        } else {
            DuoplanError::SpaceFull(space.id)
        });
    }

    space.partner_id = Some(user_id.to_string());
    store.write_space(&space).await?;
    store.write_membership(user_id, Some(&space.id)).await?;

    info!(space_id = %space.id, "joined couple space");
    Ok(space)
}

/// Drop `user_id`'s membership. When the creator leaves, the space and its
/// itinerary are deleted as well; a partner leaving leaves both in place.
pub async fn leave_space(store: &dyn SpaceStore, user_id: &str) -> DuoplanResult<()> {
    let Some(space_id) = store.read_membership(user_id).await? else {
        return Err(DuoplanError::NotInSpace(user_id.to_string()));
    };

    store.write_membership(user_id, None).await?;

    let space = store.read_space(&space_id).await?;
    if space.is_some_and(|s| s.creator_id == user_id) {
        store.delete_space(&space_id).await?;
        info!(space_id = %space_id, "deleted couple space");
    } else {
        info!(space_id = %space_id, "left couple space");
    }
    Ok(())
}

/// The space `user_id` belongs to. A membership pointing at a space that
/// was deleted, or recreated without this user, counts as none.
pub async fn current_space(
    store: &dyn SpaceStore,
    user_id: &str,
) -> DuoplanResult<Option<CoupleSpace>> {
    let Some(space_id) = store.read_membership(user_id).await? else {
        return Ok(None);
    };

    let space = store.read_space(&space_id).await?;
    Ok(space.filter(|s| s.is_member(user_id)))
}

/// The user's space, once both partners have joined.
pub async fn active_space(store: &dyn SpaceStore, user_id: &str) -> DuoplanResult<CoupleSpace> {
    match current_space(store, user_id).await? {
        Some(space) if space.is_active() => Ok(space),
        Some(space) => Err(DuoplanError::WaitingForPartner(space.id)),
        None => Err(DuoplanError::NotInSpace(user_id.to_string())),
    }
}
