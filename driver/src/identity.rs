use kernel::interface::identity::IdentityGenerator;
use kernel::prelude::entity::{AccountNumber, LoanId, MemberId};
use rand::Rng;
use uuid::Uuid;

const ACCOUNT_NUMBER_MIN: u64 = 1_000_000_000;
const ACCOUNT_NUMBER_MAX: u64 = 9_999_999_999;

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentityGenerator;

impl IdentityGenerator for RandomIdentityGenerator {
    fn member_id(&self) -> MemberId {
        MemberId::new(Uuid::new_v4())
    }

    fn loan_id(&self) -> LoanId {
        LoanId::new(Uuid::new_v4())
    }

    fn account_number(&self) -> AccountNumber {
        let number = rand::thread_rng().gen_range(ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX);
        AccountNumber::new(number.to_string())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::identity::IdentityGenerator;

    use crate::identity::RandomIdentityGenerator;

    #[test]
    fn account_numbers_have_ten_digits() {
        for _ in 0..100 {
            let number = RandomIdentityGenerator.account_number();
            let number: &String = number.as_ref();
            assert_eq!(number.len(), 10);
            assert!(number.chars().all(|c| c.is_ascii_digit()));
            assert!(!number.starts_with('0'));
        }
    }

    #[test]
    fn member_ids_differ() {
        assert_ne!(
            RandomIdentityGenerator.member_id(),
            RandomIdentityGenerator.member_id()
        );
    }

    #[test]
    fn ids_are_random_v4() {
        let member = RandomIdentityGenerator.member_id();
        let loan = RandomIdentityGenerator.loan_id();
        let ids: [&uuid::Uuid; 2] = [member.as_ref(), loan.as_ref()];
        for id in ids {
            assert!(!id.is_nil());
            assert_eq!(id.get_version_num(), 4);
        }
    }
}
