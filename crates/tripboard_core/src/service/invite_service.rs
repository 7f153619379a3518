//! Member and invitation use-case service.
//!
//! # Responsibility
//! - Manage trip members and the invitations that turn into members.
//! - Perform invite acceptance as one atomic two-collection write.
//!
//! # Invariants
//! - Acceptance holds the invitations lock, then the members lock; no other
//!   path takes both, so the order cannot deadlock.
//! - An accepted invitation always has a matching member record.
//! - Only `pending` invitations can be accepted or declined.

use crate::latency::OpWeight;
use crate::model::invitation::{Invitation, InvitationStatus, NewInvitation};
use crate::model::member::{Member, MemberPatch, MemberStatus, NewMember};
use crate::model::EntityId;
use crate::repo::entity_repo::{not_found, position_of};
use crate::repo::{new_entity_id, InvitationRepository, MemberRepository, RepoError, RepoResult};
use chrono::{DateTime, Utc};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";
const AVATAR_BACKGROUND: &str = "5B5FDE";
const AVATAR_FOREGROUND: &str = "fff";
pub const DEFAULT_INVITE_MESSAGE: &str = "You've been invited to join our trip!";

static NAME_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[._]").expect("valid name separator regex"));

/// Result of accepting an invitation.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedInvite {
    pub invitation: Invitation,
    pub member: Member,
}

pub struct InviteService {
    members: MemberRepository,
    invitations: InvitationRepository,
}

impl InviteService {
    pub fn new(members: MemberRepository, invitations: InvitationRepository) -> Self {
        Self {
            members,
            invitations,
        }
    }

    pub async fn members_for_trip(&self, trip_id: &str) -> Vec<Member> {
        self.members.get_by_trip_id(trip_id).await
    }

    pub async fn get_member(&self, member_id: &str) -> Option<Member> {
        self.members.get_by_id(member_id).await
    }

    /// Adds an active member joined now.
    pub async fn add_member(&self, input: NewMember) -> Member {
        let avatar = if input.avatar.trim().is_empty() {
            avatar_url(&input.name)
        } else {
            input.avatar
        };
        let member = Member {
            id: EntityId::new(),
            trip_id: input.trip_id,
            name: input.name,
            email: input.email,
            role: input.role,
            avatar,
            joined_at: Utc::now(),
            status: MemberStatus::Active,
        };
        self.members.create(member).await
    }

    pub async fn update_member(&self, member_id: &str, patch: MemberPatch) -> RepoResult<Member> {
        self.members.update(member_id, patch).await
    }

    pub async fn remove_member(&self, member_id: &str) -> RepoResult<Member> {
        self.members.delete(member_id).await
    }

    pub async fn invitations_for_trip(&self, trip_id: &str) -> Vec<Invitation> {
        self.invitations.get_by_trip_id(trip_id).await
    }

    /// Records a pending invitation sent now.
    ///
    /// # Errors
    /// - `RepoError::InvalidInput` when the invitee email is blank or has no `@`.
    pub async fn send_invite(&self, input: NewInvitation) -> RepoResult<Invitation> {
        let invitee_email = input.invitee_email.trim().to_string();
        if invitee_email.is_empty() {
            return Err(RepoError::InvalidInput(
                "invitee email cannot be empty".to_string(),
            ));
        }
        if !invitee_email.contains('@') {
            return Err(RepoError::InvalidInput(format!(
                "invitee email is not an address: {invitee_email}"
            )));
        }

        let invitee_name = if input.invitee_name.trim().is_empty() {
            invitee_name_from_email(&invitee_email)
        } else {
            input.invitee_name
        };

        let message = if input.message.trim().is_empty() {
            DEFAULT_INVITE_MESSAGE.to_string()
        } else {
            input.message
        };

        let invitation = Invitation {
            id: EntityId::new(),
            trip_id: input.trip_id,
            invitee_name,
            invitee_email,
            role: input.role,
            message,
            status: InvitationStatus::Pending,
            sent_at: Utc::now(),
            accepted_at: None,
            declined_at: None,
        };
        Ok(self.invitations.create(invitation).await)
    }

    /// Marks the invitation accepted and adds the invitee as an active member.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when the invitation does not exist.
    /// - `RepoError::InvalidInput` when the invitation is no longer pending.
    pub async fn accept_invite(&self, invite_id: &str) -> RepoResult<AcceptedInvite> {
        self.invitations.latency().wait(OpWeight::Update).await;

        let mut invitations = self.invitations.write().await;
        let index = position_of(&invitations, invite_id)
            .ok_or_else(|| not_found::<Invitation>("accept", invite_id))?;
        ensure_pending(&invitations[index])?;

        let mut members = self.members.write().await;
        let now = Utc::now();
        let invitation = &mut invitations[index];
        invitation.status = InvitationStatus::Accepted;
        invitation.accepted_at = Some(now);

        let member = member_from_invitation(invitation, now);
        members.push(member.clone());

        info!(
            "event=invite_accept module=service status=ok invite_id={} member_id={}",
            invite_id, member.id
        );
        Ok(AcceptedInvite {
            invitation: invitation.clone(),
            member,
        })
    }

    /// Marks a pending invitation declined.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when the invitation does not exist.
    /// - `RepoError::InvalidInput` when the invitation is no longer pending.
    pub async fn decline_invite(&self, invite_id: &str) -> RepoResult<Invitation> {
        self.invitations
            .mutate(OpWeight::Delete, invite_id, |invitation| {
                ensure_pending(invitation)?;
                invitation.status = InvitationStatus::Declined;
                invitation.declined_at = Some(Utc::now());
                Ok(())
            })
            .await
            .map(|(invitation, ())| invitation)
    }

    pub async fn delete_invitation(&self, invite_id: &str) -> RepoResult<Invitation> {
        self.invitations.delete(invite_id).await
    }
}

fn ensure_pending(invitation: &Invitation) -> RepoResult<()> {
    if invitation.is_pending() {
        return Ok(());
    }
    Err(RepoError::InvalidInput(format!(
        "invitation {} is no longer pending",
        invitation.id
    )))
}

fn member_from_invitation(invitation: &Invitation, joined_at: DateTime<Utc>) -> Member {
    Member {
        id: new_entity_id(),
        trip_id: invitation.trip_id.clone(),
        name: invitation.invitee_name.clone(),
        email: invitation.invitee_email.clone(),
        role: invitation.role,
        avatar: avatar_url(&invitation.invitee_name),
        joined_at,
        status: MemberStatus::Active,
    }
}

/// `jane.doe_travels@example.com` -> `jane doe travels`.
pub fn invitee_name_from_email(email: &str) -> String {
    let local_part = email.split('@').next().unwrap_or_default();
    NAME_SEPARATOR_RE
        .replace_all(local_part, " ")
        .trim()
        .to_string()
}

/// Initials-avatar URL for `name`.
pub fn avatar_url(name: &str) -> String {
    Url::parse_with_params(
        AVATAR_BASE_URL,
        &[
            ("name", name),
            ("background", AVATAR_BACKGROUND),
            ("color", AVATAR_FOREGROUND),
        ],
    )
    .map(String::from)
    .unwrap_or_default()
}
