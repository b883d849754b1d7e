use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::MemberQuery;
use kernel::interface::update::MemberModifier;
use kernel::prelude::entity::{Member, MemberEmail, MemberId, MemberName};
use kernel::KernelError;

use crate::database::postgres::{ensure_affected, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresMemberRepository;

#[async_trait::async_trait]
impl MemberQuery for PostgresMemberRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        PgMemberInternal::find_by_id(con, id).await
    }

    async fn find_by_email(
        &self,
        con: &mut PostgresTransaction,
        email: &MemberEmail,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        PgMemberInternal::find_by_email(con, email).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        PgMemberInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl MemberModifier for PostgresMemberRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        PgMemberInternal::create(con, member).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        PgMemberInternal::update(con, member).await
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    name: String,
    email: String,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member::new(
            MemberId::new(row.id),
            MemberName::new(row.name),
            MemberEmail::new(row.email),
        )
    }
}

pub(in crate::database) struct PgMemberInternal;

impl PgMemberInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        let row = sqlx::query_as::<_, MemberRow>(
            // language=postgresql
            r#"
            SELECT id, name, email
            FROM members
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Member::from))
    }

    async fn find_by_email(
        con: &mut PgConnection,
        email: &MemberEmail,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        let row = sqlx::query_as::<_, MemberRow>(
            // language=postgresql
            r#"
            SELECT id, name, email
            FROM members
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Member::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Member>, KernelError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            // language=postgresql
            r#"
            SELECT id, name, email
            FROM members
            ORDER BY seq
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn create(con: &mut PgConnection, member: &Member) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO members (id, name, email)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(member.id().as_ref())
        .bind(member.name().as_ref())
        .bind(member.email().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, member: &Member) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE members
            SET name = $2, email = $3
            WHERE id = $1
            "#,
        )
        .bind(member.id().as_ref())
        .bind(member.name().as_ref())
        .bind(member.email().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        ensure_affected(result, "members")
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::MemberQuery;
    use kernel::interface::update::MemberModifier;
    use kernel::prelude::entity::{Member, MemberEmail, MemberId, MemberName, MemberPatch};
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresMemberRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_by_id() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;
        let id = MemberId::new(Uuid::new_v4());
        let email = MemberEmail::new(format!("{}@example.com", id.as_ref()));
        let mut member = Member::new(id.clone(), MemberName::new("test"), email.clone());

        PostgresMemberRepository
            .create(&mut connection, &member)
            .await?;

        let found = PostgresMemberRepository
            .find_by_id(&mut connection, &id)
            .await?;
        assert_eq!(found, Some(member.clone()));
        let found = PostgresMemberRepository
            .find_by_email(&mut connection, &email)
            .await?;
        assert_eq!(found, Some(member.clone()));

        member.apply(MemberPatch::new(Some(MemberName::new("test2")), None));
        PostgresMemberRepository
            .update(&mut connection, &member)
            .await?;

        let found = PostgresMemberRepository
            .find_by_id(&mut connection, &id)
            .await?;
        assert_eq!(found, Some(member));

        connection.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn duplicate_email() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;
        let email = MemberEmail::new(format!("{}@example.com", Uuid::new_v4()));
        let first = Member::new(
            MemberId::new(Uuid::new_v4()),
            MemberName::new("first"),
            email.clone(),
        );
        let second = Member::new(MemberId::new(Uuid::new_v4()), MemberName::new("second"), email);

        PostgresMemberRepository.create(&mut connection, &first).await?;
        let error = PostgresMemberRepository
            .create(&mut connection, &second)
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::DuplicateKey);
        Ok(())
    }
}
