//! IBAN/BIC checks and withdrawal fee math.

use super::wire::{WithdrawalMethodCreate, WithdrawalRequest};
use super::{WithdrawalDraft, WithdrawalMethodDraft, WithdrawalPreview, WITHDRAWAL_CURRENCY};
use crate::domain::account::{find_account, Account};
use crate::error::ValidationError;
use crate::shared::{parse_quantity_input, round_cents};
use rust_decimal::Decimal;

/// Flat minimum fee in EUR.
pub const WITHDRAWAL_FEE_MIN: Decimal = Decimal::ONE;
/// Variable fee rate: 0.5%.
pub const WITHDRAWAL_FEE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

/// Strip whitespace and upper-case.
pub fn normalize_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// ISO 13616 check: 15 to 34 ASCII alphanumerics and mod-97 remainder of 1.
pub fn iban_checksum_valid(iban: &str) -> bool {
    let iban = normalize_iban(iban);
    if !(15..=34).contains(&iban.len()) || !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let (head, rest) = iban.split_at(4);
    let mut remainder: u32 = 0;
    for c in rest.chars().chain(head.chars()) {
        remainder = match c.to_digit(10) {
            Some(d) => (remainder * 10 + d) % 97,
            // A..Z map to 10..35
            None => (remainder * 100 + (c as u32 - 'A' as u32 + 10)) % 97,
        };
    }
    remainder == 1
}

/// `AAAABBCC` or `AAAABBCCDDD`: bank and country letters, then alphanumerics.
pub fn bic_valid(bic: &str) -> bool {
    let bic = bic.trim().to_ascii_uppercase();
    if bic.len() != 8 && bic.len() != 11 {
        return false;
    }
    bic.chars().enumerate().all(|(i, c)| {
        if i < 6 {
            c.is_ascii_uppercase()
        } else {
            c.is_ascii_uppercase() || c.is_ascii_digit()
        }
    })
}

/// `max(round_cents(amount × 0.5%), 1.00)`, `None` on overflow.
pub fn withdrawal_fee(amount: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(WITHDRAWAL_FEE_RATE)
        .map(|fee| round_cents(fee).max(WITHDRAWAL_FEE_MIN))
}

impl WithdrawalPreview {
    /// `None` when the total debit does not fit in a `Decimal`.
    pub fn for_amount(amount: Decimal) -> Option<Self> {
        let amount = round_cents(amount);
        let fee = withdrawal_fee(amount)?;
        let total_debit = round_cents(amount.checked_add(fee)?);
        Some(Self {
            amount,
            fee,
            total_debit,
        })
    }
}

impl WithdrawalMethodDraft {
    /// Normalize and check the draft, producing the request body.
    pub fn validate(&self) -> Result<WithdrawalMethodCreate, ValidationError> {
        let iban = normalize_iban(&self.iban);
        if iban.is_empty() {
            return Err(ValidationError::MissingIban);
        }
        if !iban_checksum_valid(&iban) {
            return Err(ValidationError::InvalidIban);
        }
        let bic = non_blank(self.bic.as_deref()).map(str::to_ascii_uppercase);
        if let Some(bic) = &bic {
            if !bic_valid(bic) {
                return Err(ValidationError::InvalidBic);
            }
        }
        Ok(WithdrawalMethodCreate {
            account_holder_name: self.account_holder_name.trim().to_string(),
            iban,
            bic,
            bank_name: non_blank(self.bank_name.as_deref()).map(str::to_string),
            is_default: self.is_default,
        })
    }
}

impl WithdrawalDraft {
    pub fn parsed_amount(&self) -> Decimal {
        parse_quantity_input(&self.amount_input)
    }

    /// Fee preview, `None` while the amount is not positive or too large.
    pub fn preview(&self) -> Option<WithdrawalPreview> {
        let amount = self.parsed_amount();
        if amount <= Decimal::ZERO {
            return None;
        }
        WithdrawalPreview::for_amount(amount)
    }

    /// Check the draft against the user's accounts and build the request.
    pub fn validate(&self, accounts: &[Account]) -> Result<WithdrawalRequest, ValidationError> {
        let account = self
            .account_id
            .as_ref()
            .and_then(|id| find_account(accounts, id))
            .ok_or(ValidationError::MissingAccount)?;
        let method_id = self
            .method_id
            .as_ref()
            .filter(|id| !id.as_str().is_empty())
            .ok_or(ValidationError::MissingWithdrawalMethod)?;
        let amount = self.parsed_amount();
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        let preview =
            WithdrawalPreview::for_amount(amount).ok_or(ValidationError::AmountOutOfRange)?;
        if preview.total_debit > account.balance {
            return Err(ValidationError::InsufficientBalance {
                required: preview.total_debit,
                available: account.balance,
            });
        }
        Ok(WithdrawalRequest {
            account_id: account.id.clone(),
            method_id: method_id.clone(),
            amount: preview.amount,
            currency: WITHDRAWAL_CURRENCY.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::AccountId;
    use chrono::{DateTime, Utc};
    use std::str::FromStr;

    const VALID_IBAN: &str = "IT60X0542811101000000123456";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn accounts(balance: &str) -> Vec<Account> {
        vec![Account {
            id: AccountId::from("acc-1"),
            name: "Main".into(),
            currency: "EUR".into(),
            balance: dec(balance),
            created_at: DateTime::<Utc>::default(),
        }]
    }

    #[test]
    fn iban_checks() {
        assert!(iban_checksum_valid(VALID_IBAN));
        assert!(iban_checksum_valid("it60 x054 2811 1010 0000 0123 456"));
        assert!(iban_checksum_valid("GB82WEST12345698765432"));
        assert!(!iban_checksum_valid("IT61X0542811101000000123456"));
        assert!(!iban_checksum_valid("IT60X05428"));
        assert!(!iban_checksum_valid("IT60X0542811101000000123-56"));
    }

    #[test]
    fn bic_checks() {
        assert!(bic_valid("DEUTDEFF"));
        assert!(bic_valid("deutdeff500"));
        assert!(!bic_valid("DEUTDEF"));
        assert!(!bic_valid("DEU1DEFF"));
        assert!(!bic_valid("DEUTDEFF50"));
    }

    #[test]
    fn fee_has_a_floor() {
        assert_eq!(withdrawal_fee(dec("100")), Some(dec("1.00")));
        assert_eq!(withdrawal_fee(dec("200")), Some(dec("1.00")));
        assert_eq!(withdrawal_fee(dec("1000")), Some(dec("5.00")));
        assert_eq!(withdrawal_fee(dec("333.33")), Some(dec("1.67")));

        let preview = WithdrawalPreview::for_amount(dec("1000")).unwrap();
        assert_eq!(preview.total_debit, dec("1005.00"));
    }

    #[test]
    fn huge_amount_is_rejected_not_overflowed() {
        let draft = WithdrawalDraft::new()
            .account("acc-1")
            .method("m-1")
            .amount("79228162514264337593543950335");
        assert_eq!(draft.preview(), None);
        assert_eq!(
            draft.validate(&accounts("500")),
            Err(ValidationError::AmountOutOfRange)
        );
        assert_eq!(WithdrawalPreview::for_amount(Decimal::MAX), None);
    }

    #[test]
    fn method_draft_normalizes() {
        let body = WithdrawalMethodDraft::new(" Mario Rossi ", "it60 x054 2811 1010 0000 0123 456")
            .bic("bcitittm")
            .bank_name("  ")
            .validate()
            .unwrap();
        assert_eq!(body.iban, VALID_IBAN);
        assert_eq!(body.bic.as_deref(), Some("BCITITTM"));
        assert_eq!(body.bank_name, None);
        assert_eq!(body.account_holder_name, "Mario Rossi");
    }

    #[test]
    fn method_draft_rejections() {
        assert_eq!(
            WithdrawalMethodDraft::new("A", "  ").validate(),
            Err(ValidationError::MissingIban)
        );
        assert_eq!(
            WithdrawalMethodDraft::new("A", "IT00X0542811101000000123456").validate(),
            Err(ValidationError::InvalidIban)
        );
        assert_eq!(
            WithdrawalMethodDraft::new("A", VALID_IBAN).bic("NOPE").validate(),
            Err(ValidationError::InvalidBic)
        );
    }

    #[test]
    fn withdrawal_draft_checks_order() {
        let accs = accounts("500");
        assert_eq!(
            WithdrawalDraft::new().method("m-1").amount("10").validate(&accs),
            Err(ValidationError::MissingAccount)
        );
        assert_eq!(
            WithdrawalDraft::new().account("acc-1").amount("10").validate(&accs),
            Err(ValidationError::MissingWithdrawalMethod)
        );
        assert_eq!(
            WithdrawalDraft::new().account("acc-1").method("m-1").amount("0").validate(&accs),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            WithdrawalDraft::new().account("acc-1").method("m-1").amount("499.50").validate(&accs),
            Err(ValidationError::InsufficientBalance {
                required: dec("502.00"),
                available: dec("500"),
            })
        );
    }

    #[test]
    fn withdrawal_draft_builds_request() {
        let req = WithdrawalDraft::new()
            .account("acc-1")
            .method("m-1")
            .amount("250")
            .validate(&accounts("300"))
            .unwrap();
        assert_eq!(req.amount, dec("250"));
        assert_eq!(req.currency, "EUR");
        assert_eq!(req.method_id.as_str(), "m-1");
    }
}
