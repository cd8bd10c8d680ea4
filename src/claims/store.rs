//! Claim store: every list/get/transition operation runs through here.
//!
//! All mutations are single-document compare-and-swap writes on the claim's
//! `version` column. A lost race surfaces as `Consistency` instead of
//! silently last-write-wins. The jurisdiction filter is applied inside every
//! query; callers never see documents outside their scope.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use sea_orm::ActiveValue::Unchanged;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

use crate::claims::mapdata::{MapArea, MapData};
use crate::claims::status::{transition, Action, ClaimStatus};
use crate::claims::types::{
    ApplicantDetails, ClaimBasis, ClaimType, Eligibility, EvidenceBundle, GramSabhaResolution,
    LandDetails, RightsRequested,
};
use crate::claims::workflow::{DistrictAction, GsAction, SubdivisionAction, WorkflowRecord};
use crate::db::entities::claim;
use crate::error::{Result, ServerError};
use crate::jurisdiction::{GpCode, Role, Scope};

/// The authenticated actor a store operation runs as. Produced from the
/// officer registry; the store trusts it for every legality check.
#[derive(Clone, Debug)]
pub struct Actor {
    pub officer_id: String,
    pub role: Role,
    pub scope: Scope,
}

/// A claim as supplied by the claimant-submission collaborator. Status,
/// workflow placeholders and map data are set by the store, never by the
/// caller.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    pub frapattaid: String,
    pub claim_type: ClaimType,
    pub gram_panchayat: String,
    pub tehsil: String,
    pub district: String,
    pub gp_code: String,
    #[serde(default)]
    pub applicant: ApplicantDetails,
    #[serde(default)]
    pub eligibility: Eligibility,
    #[serde(default)]
    pub land: LandDetails,
    #[serde(default)]
    pub claim_basis: ClaimBasis,
    #[serde(default)]
    pub evidence: EvidenceBundle,
    #[serde(default)]
    pub rights_requested: RightsRequested,
    #[serde(default)]
    pub resolution: GramSabhaResolution,
}

pub struct ClaimStore {
    db: Arc<DatabaseConnection>,
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

impl ClaimStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Accept a new claim from the submission collaborator. Jurisdiction
    /// fields are fixed here for the claim's lifetime; the GP code is parsed
    /// once and a malformed code leaves the subdivision column NULL, hiding
    /// the claim from every scoped officer.
    pub async fn submit(&self, new: NewClaim) -> Result<claim::Model> {
        if new.frapattaid.trim().is_empty() {
            return Err(ServerError::Validation("frapattaid must not be empty".to_string()));
        }
        if new.district.trim().is_empty() {
            return Err(ServerError::Validation("district must not be empty".to_string()));
        }

        let subdivision = match new.gp_code.parse::<GpCode>() {
            Ok(gp) => Some(gp.subdivision_code),
            Err(_) => {
                tracing::warn!(
                    frapattaid = %new.frapattaid,
                    gp_code = %new.gp_code,
                    "claim submitted with malformed GP code; visible to admin only"
                );
                None
            }
        };

        if claim::Entity::find_by_id(new.frapattaid.as_str())
            .one(self.db.as_ref())
            .await?
            .is_some()
        {
            return Err(ServerError::ClaimAlreadyExists(new.frapattaid));
        }

        let ts = now();
        let model = claim::ActiveModel {
            frapattaid: Set(new.frapattaid),
            claim_type: Set(new.claim_type),
            gram_panchayat: Set(new.gram_panchayat),
            tehsil: Set(new.tehsil),
            district: Set(new.district),
            gp_code: Set(new.gp_code),
            subdivision: Set(subdivision),
            applicant: Set(new.applicant),
            eligibility: Set(new.eligibility),
            land: Set(new.land),
            claim_basis: Set(new.claim_basis),
            evidence: Set(new.evidence),
            rights_requested: Set(new.rights_requested),
            resolution: Set(new.resolution),
            status: Set(ClaimStatus::Submitted),
            workflow: Set(WorkflowRecord::default()),
            map_data: Set(None),
            version: Set(0),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(self.db.as_ref())
        .await?;

        tracing::info!(frapattaid = %model.frapattaid, gp_code = %model.gp_code, "claim submitted");
        Ok(model)
    }

    /// List claims inside the actor's scope, newest first, optionally
    /// narrowed to one status. The filter runs in the query itself.
    pub async fn list_for(
        &self,
        scope: &Scope,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<claim::Model>> {
        let mut query = claim::Entity::find();
        match scope {
            Scope::GpCode { gp_code } => {
                query = query
                    .filter(claim::Column::GpCode.eq(gp_code))
                    .filter(claim::Column::Subdivision.is_not_null());
            }
            Scope::Subdivision { subdivision_code } => {
                query = query.filter(claim::Column::Subdivision.eq(subdivision_code));
            }
            Scope::District { district } => {
                query = query
                    .filter(claim::Column::District.eq(district))
                    .filter(claim::Column::Subdivision.is_not_null());
            }
            Scope::All => {}
        }
        if let Some(status) = status {
            query = query.filter(claim::Column::Status.eq(status));
        }
        Ok(query
            .order_by_desc(claim::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    /// Fetch one claim, scoped. A claim outside the actor's jurisdiction
    /// reads as not-found rather than confirming its existence.
    pub async fn get_for(&self, scope: &Scope, claim_id: &str) -> Result<claim::Model> {
        let model = claim::Entity::find_by_id(claim_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServerError::ClaimNotFound(claim_id.to_string()))?;
        if !scope.contains(&model.gp_code, model.subdivision.as_deref(), &model.district) {
            return Err(ServerError::ClaimNotFound(claim_id.to_string()));
        }
        Ok(model)
    }

    /// Attach (or re-save, while still at the Gram Sabha stage) the map
    /// drawn for this claim, recomputing the aggregate in the same write.
    pub async fn record_mapping(
        &self,
        actor: &Actor,
        claim_id: &str,
        areas: Vec<MapArea>,
    ) -> Result<claim::Model> {
        let model = self.fetch(claim_id).await?;
        let next = self.check_transition(&model, actor, Action::RecordMapping)?;

        let ts = now();
        let map_data = match &model.map_data {
            Some(existing) => existing.resave(areas, ts)?,
            None => MapData::from_areas(areas, ts)?,
        };

        let mut workflow = model.workflow.clone();
        workflow
            .gs_officer
            .record(&actor.officer_id, GsAction::Mapped, None, ts);

        self.update_claim(&model, next, workflow, Some(map_data), actor, Action::RecordMapping)
            .await
    }

    /// Pass the claim to the next stage. The destination depends on who
    /// forwards: the Gram Sabha hands off to the subdivision, the
    /// subdivision passes the claim onward to the district.
    pub async fn forward(
        &self,
        actor: &Actor,
        claim_id: &str,
        notes: Option<String>,
    ) -> Result<claim::Model> {
        let model = self.fetch(claim_id).await?;
        let next = self.check_transition(&model, actor, Action::Forward)?;

        let ts = now();
        let mut workflow = model.workflow.clone();
        match actor.role {
            Role::GramSabha => {
                workflow
                    .gs_officer
                    .record(&actor.officer_id, GsAction::Forwarded, notes, ts)
            }
            Role::Subdivision => workflow.subdivision_officer.record(
                &actor.officer_id,
                SubdivisionAction::Forwarded,
                notes,
                ts,
            ),
            // Unreachable past check_transition; kept total.
            _ => {
                return Err(ServerError::Authorization(format!(
                    "role {} cannot forward claims",
                    actor.role
                )))
            }
        }

        self.update_claim(&model, next, workflow, model.map_data.clone(), actor, Action::Forward)
            .await
    }

    /// Mark the claim under review at the acting officer's stage.
    pub async fn begin_review(&self, actor: &Actor, claim_id: &str) -> Result<claim::Model> {
        let model = self.fetch(claim_id).await?;
        let next = self.check_transition(&model, actor, Action::BeginReview)?;

        let ts = now();
        let mut workflow = model.workflow.clone();
        match actor.role {
            Role::Subdivision => workflow.subdivision_officer.record(
                &actor.officer_id,
                SubdivisionAction::ReviewStarted,
                None,
                ts,
            ),
            Role::District => workflow.district_officer.record(
                &actor.officer_id,
                DistrictAction::ReviewStarted,
                None,
                ts,
            ),
            _ => {
                return Err(ServerError::Authorization(format!(
                    "role {} cannot review claims",
                    actor.role
                )))
            }
        }

        self.update_claim(&model, next, workflow, model.map_data.clone(), actor, Action::BeginReview)
            .await
    }

    /// Terminally reject the claim at the acting stage. Rejection is final;
    /// there is no resubmission path.
    pub async fn reject(
        &self,
        actor: &Actor,
        claim_id: &str,
        reason: &str,
    ) -> Result<claim::Model> {
        if reason.trim().is_empty() {
            return Err(ServerError::Validation(
                "a rejection requires a reason".to_string(),
            ));
        }

        let model = self.fetch(claim_id).await?;
        let next = self.check_transition(&model, actor, Action::Reject)?;

        let ts = now();
        let mut workflow = model.workflow.clone();
        match actor.role {
            Role::Subdivision => workflow.subdivision_officer.record(
                &actor.officer_id,
                SubdivisionAction::Rejected,
                Some(reason.to_string()),
                ts,
            ),
            Role::District => workflow.district_officer.record(
                &actor.officer_id,
                DistrictAction::Rejected,
                Some(reason.to_string()),
                ts,
            ),
            _ => {
                return Err(ServerError::Authorization(format!(
                    "role {} cannot reject claims",
                    actor.role
                )))
            }
        }

        self.update_claim(&model, next, workflow, model.map_data.clone(), actor, Action::Reject)
            .await
    }

    /// Grant the title. District stage only; terminal.
    pub async fn approve(
        &self,
        actor: &Actor,
        claim_id: &str,
        remarks: Option<String>,
    ) -> Result<claim::Model> {
        let model = self.fetch(claim_id).await?;
        let next = self.check_transition(&model, actor, Action::Approve)?;

        let ts = now();
        let mut workflow = model.workflow.clone();
        workflow
            .district_officer
            .record(&actor.officer_id, DistrictAction::Approved, remarks, ts);

        self.update_claim(&model, next, workflow, model.map_data.clone(), actor, Action::Approve)
            .await
    }

    async fn fetch(&self, claim_id: &str) -> Result<claim::Model> {
        claim::Entity::find_by_id(claim_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServerError::ClaimNotFound(claim_id.to_string()))
    }

    /// Scope, terminal, role and table checks, in that order. Returns the
    /// target status. Leaves the claim untouched on any failure.
    fn check_transition(
        &self,
        model: &claim::Model,
        actor: &Actor,
        action: Action,
    ) -> Result<ClaimStatus> {
        if !actor
            .scope
            .contains(&model.gp_code, model.subdivision.as_deref(), &model.district)
        {
            return Err(ServerError::Authorization(format!(
                "claim {} is outside {}",
                model.frapattaid,
                actor.scope.describe()
            )));
        }

        let from = model.status;
        if from.is_terminal() {
            return Err(ServerError::ClaimFinalized(model.frapattaid.clone()));
        }

        if let Some(next) = transition(from, actor.role, action) {
            return Ok(next);
        }

        // Distinguish "wrong officer" from "wrong state" for the caller.
        let legal_for_other_role = [Role::GramSabha, Role::Subdivision, Role::District]
            .iter()
            .any(|role| transition(from, *role, action).is_some());
        if legal_for_other_role {
            Err(ServerError::Authorization(format!(
                "role {} may not {} a claim in state {}",
                actor.role, action, from
            )))
        } else {
            Err(ServerError::InvalidTransition(format!(
                "cannot {} a claim in state {}",
                action, from
            )))
        }
    }

    /// Compare-and-swap write: the update only lands if the row still holds
    /// the version this operation read. Zero rows with the claim still
    /// present means another officer's write won the race.
    async fn update_claim(
        &self,
        original: &claim::Model,
        next: ClaimStatus,
        workflow: WorkflowRecord,
        map_data: Option<MapData>,
        actor: &Actor,
        action: Action,
    ) -> Result<claim::Model> {
        let active = claim::ActiveModel {
            frapattaid: Unchanged(original.frapattaid.clone()),
            status: Set(next),
            workflow: Set(workflow),
            map_data: Set(map_data),
            version: Set(original.version + 1),
            updated_at: Set(now()),
            ..Default::default()
        };

        let result = claim::Entity::update(active)
            .filter(claim::Column::Version.eq(original.version))
            .exec(self.db.as_ref())
            .await;

        match result {
            Ok(updated) => {
                tracing::info!(
                    frapattaid = %updated.frapattaid,
                    officer = %actor.officer_id,
                    role = %actor.role,
                    %action,
                    from = %original.status,
                    to = %updated.status,
                    "claim transition applied"
                );
                Ok(updated)
            }
            Err(DbErr::RecordNotUpdated) => {
                let still_exists = claim::Entity::find_by_id(original.frapattaid.as_str())
                    .one(self.db.as_ref())
                    .await?
                    .is_some();
                if still_exists {
                    tracing::warn!(
                        frapattaid = %original.frapattaid,
                        officer = %actor.officer_id,
                        "concurrent modification detected"
                    );
                    Err(ServerError::Consistency(original.frapattaid.clone()))
                } else {
                    Err(ServerError::ClaimNotFound(original.frapattaid.clone()))
                }
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::mapdata::AreaKind;
    use serde_json::json;

    async fn store() -> ClaimStore {
        let db = crate::db::init_in_memory().await.unwrap();
        ClaimStore::new(Arc::new(db))
    }

    fn new_claim(id: &str, gp_code: &str, district: &str) -> NewClaim {
        NewClaim {
            frapattaid: id.to_string(),
            claim_type: ClaimType::Individual,
            gram_panchayat: "Amoni".to_string(),
            tehsil: "Huzur".to_string(),
            district: district.to_string(),
            gp_code: gp_code.to_string(),
            applicant: ApplicantDetails {
                name: "Ramesh Uike".to_string(),
                village: "Amoni".to_string(),
                ..Default::default()
            },
            eligibility: Eligibility {
                is_st: true,
                ..Default::default()
            },
            land: LandDetails::default(),
            claim_basis: ClaimBasis::default(),
            evidence: EvidenceBundle::default(),
            rights_requested: RightsRequested::default(),
            resolution: GramSabhaResolution::default(),
        }
    }

    fn gs_actor(gp_code: &str) -> Actor {
        Actor {
            officer_id: format!("gs-{}", gp_code),
            role: Role::GramSabha,
            scope: Scope::GpCode {
                gp_code: gp_code.to_string(),
            },
        }
    }

    fn sd_actor(code: &str) -> Actor {
        Actor {
            officer_id: format!("sd-{}", code),
            role: Role::Subdivision,
            scope: Scope::Subdivision {
                subdivision_code: code.to_string(),
            },
        }
    }

    fn district_actor(district: &str) -> Actor {
        Actor {
            officer_id: format!("d-{}", district),
            role: Role::District,
            scope: Scope::District {
                district: district.to_string(),
            },
        }
    }

    fn admin_actor() -> Actor {
        Actor {
            officer_id: "admin".to_string(),
            role: Role::Admin,
            scope: Scope::All,
        }
    }

    fn polygon(id: &str, area: f64) -> MapArea {
        MapArea {
            id: id.to_string(),
            area,
            kind: AreaKind::Polygon,
            geometry: json!({"type": "Polygon", "coordinates": [[[77.3, 23.2], [77.4, 23.2], [77.3, 23.2]]]}),
        }
    }

    #[tokio::test]
    async fn test_submit_initial_state() {
        let store = store().await;
        let model = store
            .submit(new_claim("FRA-001", "GS-PHN-134363", "Bhopal"))
            .await
            .unwrap();

        assert_eq!(model.status, ClaimStatus::Submitted);
        assert_eq!(model.subdivision.as_deref(), Some("PHN"));
        assert!(model.map_data.is_none());
        assert!(!model.workflow.gs_officer.has_acted());
        assert_eq!(model.version, 0);

        let err = store
            .submit(new_claim("FRA-001", "GS-PHN-134363", "Bhopal"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::ClaimAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let store = store().await;
        store
            .submit(new_claim("FRA-002", "GS-PHN-134363", "Bhopal"))
            .await
            .unwrap();

        // Gram Sabha officer maps one 10,000 m² polygon.
        let gs = gs_actor("GS-PHN-134363");
        let mapped = store
            .record_mapping(&gs, "FRA-002", vec![polygon("a1", 10_000.0)])
            .await
            .unwrap();
        assert_eq!(mapped.status, ClaimStatus::MappedByGramSabha);
        let map = mapped.map_data.as_ref().unwrap();
        assert_eq!(map.total_area, 10_000.0);
        assert_eq!(mapped.workflow.gs_officer.action, Some(GsAction::Mapped));

        // Subdivision officer for Phanda forwards with notes.
        let sd = sd_actor("PHN");
        let forwarded = store
            .forward(&sd, "FRA-002", Some("Records verified at block level".to_string()))
            .await
            .unwrap();
        assert_eq!(forwarded.status, ClaimStatus::ForwardedToDistrict);
        assert_eq!(
            forwarded.workflow.subdivision_officer.action,
            Some(SubdivisionAction::Forwarded)
        );

        // District officer for Bhopal grants the title.
        let district = district_actor("Bhopal");
        let granted = store
            .approve(&district, "FRA-002", Some("All documents verified".to_string()))
            .await
            .unwrap();
        assert_eq!(granted.status, ClaimStatus::TitleGranted);
        assert_eq!(
            granted.workflow.district_officer.action,
            Some(DistrictAction::Approved)
        );
        assert_eq!(
            granted.workflow.district_officer.remarks.as_deref(),
            Some("All documents verified")
        );
        // Map data survived the downstream stages untouched.
        assert_eq!(granted.map_data.as_ref().unwrap().total_area, 10_000.0);

        // An officer for a different GP does not see the claim.
        let other_gs = gs_actor("GS-BRS-134252");
        let visible = store.list_for(&other_gs.scope, None).await.unwrap();
        assert!(visible.is_empty());

        // Re-mapping after the grant fails: the claim is finalized.
        let err = store
            .record_mapping(&gs, "FRA-002", vec![polygon("a2", 1.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::ClaimFinalized(_)));
    }

    #[tokio::test]
    async fn test_jurisdiction_isolation() {
        let store = store().await;
        store.submit(new_claim("FRA-PHN", "GS-PHN-134363", "Bhopal")).await.unwrap();
        store.submit(new_claim("FRA-BRS", "GS-BRS-134252", "Bhopal")).await.unwrap();
        store.submit(new_claim("FRA-SEH", "GS-AST-200100", "Sehore")).await.unwrap();

        let gs = store
            .list_for(&gs_actor("GS-PHN-134363").scope, None)
            .await
            .unwrap();
        assert_eq!(gs.len(), 1);
        assert_eq!(gs[0].frapattaid, "FRA-PHN");

        let sd = store.list_for(&sd_actor("BRS").scope, None).await.unwrap();
        assert_eq!(sd.len(), 1);
        assert_eq!(sd[0].frapattaid, "FRA-BRS");

        let bhopal = store
            .list_for(&district_actor("Bhopal").scope, None)
            .await
            .unwrap();
        assert_eq!(bhopal.len(), 2);
        assert!(bhopal.iter().all(|c| c.district == "Bhopal"));

        let all = store.list_for(&admin_actor().scope, None).await.unwrap();
        assert_eq!(all.len(), 3);

        // Scoped get on someone else's claim reads as not-found.
        let err = store
            .get_for(&gs_actor("GS-PHN-134363").scope, "FRA-BRS")
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::ClaimNotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_gp_code_fails_closed() {
        let store = store().await;
        let model = store
            .submit(new_claim("FRA-BAD", "not-a-gp-code", "Bhopal"))
            .await
            .unwrap();
        assert!(model.subdivision.is_none());

        // Invisible even to the matching-district officer.
        let district = store
            .list_for(&district_actor("Bhopal").scope, None)
            .await
            .unwrap();
        assert!(district.is_empty());

        let all = store.list_for(&admin_actor().scope, None).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_role_gated_transitions() {
        let store = store().await;
        store.submit(new_claim("FRA-010", "GS-PHN-134363", "Bhopal")).await.unwrap();

        // The mapping belongs to the Gram Sabha; an in-scope subdivision
        // officer attempting it gets an authorization error and the claim
        // does not move.
        let err = store
            .record_mapping(&sd_actor("PHN"), "FRA-010", vec![polygon("a1", 10.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Authorization(_)));

        // Approving a freshly submitted claim is not legal for anyone.
        let err = store
            .approve(&district_actor("Bhopal"), "FRA-010", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidTransition(_)));

        let unchanged = store.get_for(&Scope::All, "FRA-010").await.unwrap();
        assert_eq!(unchanged.status, ClaimStatus::Submitted);
        assert_eq!(unchanged.version, 0);
        assert!(!unchanged.workflow.subdivision_officer.has_acted());
    }

    #[tokio::test]
    async fn test_out_of_scope_transition_is_authorization_error() {
        let store = store().await;
        store.submit(new_claim("FRA-011", "GS-PHN-134363", "Bhopal")).await.unwrap();

        let err = store
            .record_mapping(&gs_actor("GS-BRS-134252"), "FRA-011", vec![polygon("a1", 10.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_reject_paths() {
        let store = store().await;
        let gs = gs_actor("GS-PHN-134363");

        // Subdivision rejection terminates the workflow immediately.
        store.submit(new_claim("FRA-020", "GS-PHN-134363", "Bhopal")).await.unwrap();
        store.record_mapping(&gs, "FRA-020", vec![polygon("a1", 10.0)]).await.unwrap();

        let err = store
            .reject(&sd_actor("PHN"), "FRA-020", "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Validation(_)));

        let rejected = store
            .reject(&sd_actor("PHN"), "FRA-020", "Boundary overlaps reserved forest")
            .await
            .unwrap();
        assert_eq!(rejected.status, ClaimStatus::RejectedBySubdivision);
        assert_eq!(
            rejected.workflow.subdivision_officer.remarks.as_deref(),
            Some("Boundary overlaps reserved forest")
        );

        let err = store
            .forward(&sd_actor("PHN"), "FRA-020", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::ClaimFinalized(_)));

        // District rejection.
        store.submit(new_claim("FRA-021", "GS-PHN-134363", "Bhopal")).await.unwrap();
        store.record_mapping(&gs, "FRA-021", vec![polygon("a1", 10.0)]).await.unwrap();
        store.forward(&sd_actor("PHN"), "FRA-021", None).await.unwrap();
        let rejected = store
            .reject(&district_actor("Bhopal"), "FRA-021", "Eligibility not established")
            .await
            .unwrap();
        assert_eq!(rejected.status, ClaimStatus::FinalRejected);
        assert!(rejected.status.is_terminal());
    }

    #[tokio::test]
    async fn test_review_and_gs_handoff_path() {
        let store = store().await;
        let gs = gs_actor("GS-PHN-134363");
        store.submit(new_claim("FRA-030", "GS-PHN-134363", "Bhopal")).await.unwrap();
        store.record_mapping(&gs, "FRA-030", vec![polygon("a1", 500.0)]).await.unwrap();

        // GS hands off explicitly, overwriting its own stage record.
        let handed = store
            .forward(&gs, "FRA-030", Some("Resolution passed 12 March".to_string()))
            .await
            .unwrap();
        assert_eq!(handed.status, ClaimStatus::ForwardedToSubdivision);
        assert_eq!(handed.workflow.gs_officer.action, Some(GsAction::Forwarded));

        let sd = sd_actor("PHN");
        let reviewing = store.begin_review(&sd, "FRA-030").await.unwrap();
        assert_eq!(reviewing.status, ClaimStatus::UnderSubdivisionReview);
        assert_eq!(
            reviewing.workflow.subdivision_officer.action,
            Some(SubdivisionAction::ReviewStarted)
        );

        store.forward(&sd, "FRA-030", None).await.unwrap();

        let district = district_actor("Bhopal");
        let reviewing = store.begin_review(&district, "FRA-030").await.unwrap();
        assert_eq!(reviewing.status, ClaimStatus::UnderDistrictReview);

        let granted = store.approve(&district, "FRA-030", None).await.unwrap();
        assert_eq!(granted.status, ClaimStatus::TitleGranted);
    }

    #[tokio::test]
    async fn test_map_resave_recomputes_aggregate_then_freezes() {
        let store = store().await;
        let gs = gs_actor("GS-PHN-134363");
        store.submit(new_claim("FRA-040", "GS-PHN-134363", "Bhopal")).await.unwrap();

        store
            .record_mapping(&gs, "FRA-040", vec![polygon("a1", 10_000.0)])
            .await
            .unwrap();
        let resaved = store
            .record_mapping(&gs, "FRA-040", vec![polygon("a1", 8_000.0), polygon("a2", 1_500.0)])
            .await
            .unwrap();
        let map = resaved.map_data.as_ref().unwrap();
        assert_eq!(map.total_area, 9_500.0);
        assert_eq!(map.areas.len(), 2);

        // Empty area list is rejected before anything is written.
        let err = store.record_mapping(&gs, "FRA-040", vec![]).await.unwrap_err();
        assert!(matches!(err, ServerError::Validation(_)));

        // Once the claim progresses, the map is read-only.
        store.forward(&sd_actor("PHN"), "FRA-040", None).await.unwrap();
        let err = store
            .record_mapping(&gs, "FRA-040", vec![polygon("a3", 1.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidTransition(_)));
        let frozen = store.get_for(&Scope::All, "FRA-040").await.unwrap();
        assert_eq!(frozen.map_data.as_ref().unwrap().total_area, 9_500.0);
    }

    #[tokio::test]
    async fn test_stale_write_surfaces_consistency_error() {
        let store = store().await;
        let gs = gs_actor("GS-PHN-134363");
        store.submit(new_claim("FRA-050", "GS-PHN-134363", "Bhopal")).await.unwrap();

        // Read the document, then let another write land first.
        let stale = store.get_for(&Scope::All, "FRA-050").await.unwrap();
        store
            .record_mapping(&gs, "FRA-050", vec![polygon("a1", 10.0)])
            .await
            .unwrap();

        let err = store
            .update_claim(
                &stale,
                ClaimStatus::MappedByGramSabha,
                stale.workflow.clone(),
                None,
                &gs,
                Action::RecordMapping,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Consistency(_)));
    }

    #[tokio::test]
    async fn test_list_status_filter() {
        let store = store().await;
        let gs = gs_actor("GS-PHN-134363");
        store.submit(new_claim("FRA-060", "GS-PHN-134363", "Bhopal")).await.unwrap();
        store.submit(new_claim("FRA-061", "GS-PHN-134363", "Bhopal")).await.unwrap();
        store.record_mapping(&gs, "FRA-061", vec![polygon("a1", 10.0)]).await.unwrap();

        let submitted = store
            .list_for(&gs.scope, Some(ClaimStatus::Submitted))
            .await
            .unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].frapattaid, "FRA-060");

        let mapped = store
            .list_for(&gs.scope, Some(ClaimStatus::MappedByGramSabha))
            .await
            .unwrap();
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].frapattaid, "FRA-061");
    }
}
