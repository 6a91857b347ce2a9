//! Conversions from payout wire types.

use super::wire::{WithdrawalMethodOut, WithdrawalOut};
use super::{Withdrawal, WithdrawalMethod};
use crate::shared::parse_amount;
use crate::shared::serde_util::{parse_timestamp, timestamp_or_epoch};

impl From<WithdrawalMethodOut> for WithdrawalMethod {
    fn from(m: WithdrawalMethodOut) -> Self {
        Self {
            id: m.id,
            method_type: m.method_type,
            iban: m.iban,
            bic: m.bic,
            bank_name: m.bank_name,
            account_holder_name: m.account_holder_name,
            is_default: m.is_default,
            status: m.status,
            created_at: timestamp_or_epoch(m.created_at.as_deref().unwrap_or_default()),
            verified_at: m.verified_at.as_deref().and_then(parse_timestamp),
        }
    }
}

impl From<WithdrawalOut> for Withdrawal {
    fn from(w: WithdrawalOut) -> Self {
        Self {
            id: w.id,
            method_id: w.method_id,
            account_id: w.account_id,
            amount: parse_amount(w.amount.as_ref()),
            fee: parse_amount(w.fee.as_ref()),
            currency: w.currency,
            total_debit: parse_amount(w.total_debit.as_ref()),
            status: w.status,
            requested_at: timestamp_or_epoch(w.requested_at.as_deref().unwrap_or_default()),
            reference: w.reference,
        }
    }
}
