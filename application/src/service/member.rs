use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::identity::{DependOnIdentityGenerator, IdentityGenerator};
use kernel::interface::query::{DependOnMemberQuery, MemberQuery};
use kernel::interface::update::{DependOnMemberModifier, MemberModifier};
use kernel::prelude::entity::{Member, MemberEmail, MemberId, MemberName, MemberPatch};
use kernel::KernelError;

use crate::search::Keyword;
use crate::service::{identity_exhausted, not_found, IDENTITY_ATTEMPTS};
use crate::transfer::{GetMemberDto, MemberDto, RegisterMemberDto, SearchDto, UpdateMemberDto};

fn email_taken(email: &MemberEmail) -> Report<KernelError> {
    Report::new(KernelError::DuplicateKey)
        .attach_printable(format!("Email {} is already registered", email.as_ref()))
}

#[async_trait::async_trait]
pub trait GetMemberService: 'static + Sync + Send + DependOnMemberQuery {
    async fn find_member(&self, dto: GetMemberDto) -> error_stack::Result<MemberDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = MemberId::new(dto.id);
        let member = self
            .member_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(format!("Member {}", id.as_ref())))?;
        connection.commit().await?;

        Ok(MemberDto::from(member))
    }
}

impl<T> GetMemberService for T where T: DependOnMemberQuery {}

#[async_trait::async_trait]
pub trait RegisterMemberService:
    'static
    + Sync
    + Send
    + DependOnMemberQuery
    + DependOnMemberModifier
    + DependOnIdentityGenerator
{
    async fn register_member(
        &self,
        dto: RegisterMemberDto,
    ) -> error_stack::Result<MemberDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let email = MemberEmail::new(dto.email);
        if self
            .member_query()
            .find_by_email(&mut connection, &email)
            .await?
            .is_some()
        {
            return Err(email_taken(&email));
        }

        let mut id = None;
        for _ in 0..IDENTITY_ATTEMPTS {
            let candidate = self.identity_generator().member_id();
            let taken = self
                .member_query()
                .find_by_id(&mut connection, &candidate)
                .await?
                .is_some();
            if !taken {
                id = Some(candidate);
                break;
            }
            tracing::warn!(id = %candidate.as_ref(), "member id collision");
        }
        let id = id.ok_or_else(|| identity_exhausted("member id"))?;

        let member = Member::new(id, MemberName::new(dto.name), email);
        self.member_modifier().create(&mut connection, &member).await?;
        connection.commit().await?;

        tracing::info!(id = %member.id().as_ref(), "member registered");
        Ok(MemberDto::from(member))
    }
}

impl<T> RegisterMemberService for T where
    T: DependOnMemberQuery + DependOnMemberModifier + DependOnIdentityGenerator
{
}

#[async_trait::async_trait]
pub trait UpdateMemberService:
    'static + Sync + Send + DependOnMemberQuery + DependOnMemberModifier
{
    async fn update_member(&self, dto: UpdateMemberDto) -> error_stack::Result<MemberDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = MemberId::new(dto.id);
        let mut member = self
            .member_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(format!("Member {}", id.as_ref())))?;

        let patch = MemberPatch::new(
            dto.name.map(MemberName::new),
            dto.email.map(MemberEmail::new),
        );
        if let Some(email) = patch.email() {
            let owner = self
                .member_query()
                .find_by_email(&mut connection, email)
                .await?;
            if owner.is_some_and(|owner| owner.id() != &id) {
                return Err(email_taken(email));
            }
        }
        if patch.is_empty() {
            connection.commit().await?;
            return Ok(MemberDto::from(member));
        }

        member.apply(patch);
        self.member_modifier().update(&mut connection, &member).await?;
        connection.commit().await?;

        tracing::info!(id = %id.as_ref(), "member updated");
        Ok(MemberDto::from(member))
    }
}

impl<T> UpdateMemberService for T where T: DependOnMemberQuery + DependOnMemberModifier {}

#[async_trait::async_trait]
pub trait SearchMemberService: 'static + Sync + Send + DependOnMemberQuery {
    async fn search_members(
        &self,
        dto: SearchDto,
    ) -> error_stack::Result<Vec<MemberDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let members = self.member_query().find_all(&mut connection).await?;
        connection.commit().await?;

        Ok(Keyword::new(dto.keyword)
            .filter(members)
            .into_iter()
            .map(MemberDto::from)
            .collect())
    }
}

impl<T> SearchMemberService for T where T: DependOnMemberQuery {}
