use error_stack::Report;

use kernel::interface::query::MemberQuery;
use kernel::interface::update::MemberModifier;
use kernel::prelude::entity::{Member, MemberEmail, MemberId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryMemberRepository;

fn email_taken(members: &[Member], member: &Member) -> bool {
    members
        .iter()
        .any(|row| row.email() == member.email() && row.id() != member.id())
}

fn duplicate_email(member: &Member) -> Report<KernelError> {
    Report::new(KernelError::DuplicateKey)
        .attach_printable(format!("members.email = {}", member.email().as_ref()))
}

#[async_trait::async_trait]
impl MemberQuery for InMemoryMemberRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        Ok(con
            .tables()
            .members
            .iter()
            .find(|member| member.id() == id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        con: &mut InMemoryTransaction,
        email: &MemberEmail,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        Ok(con
            .tables()
            .members
            .iter()
            .find(|member| member.email() == email)
            .cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        Ok(con.tables().members.clone())
    }
}

#[async_trait::async_trait]
impl MemberModifier for InMemoryMemberRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        let members = &mut con.tables_mut().members;
        if members.iter().any(|row| row.id() == member.id()) {
            return Err(Report::new(KernelError::DuplicateKey)
                .attach_printable(format!("members.id = {}", member.id().as_ref())));
        }
        if email_taken(members, member) {
            return Err(duplicate_email(member));
        }
        members.push(member.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        let members = &mut con.tables_mut().members;
        if email_taken(members, member) {
            return Err(duplicate_email(member));
        }
        let row = members
            .iter_mut()
            .find(|row| row.id() == member.id())
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("members.id = {}", member.id().as_ref()))
            })?;
        *row = member.clone();
        Ok(())
    }
}
