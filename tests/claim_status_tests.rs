use rcashoffer::models::claim_status::{ClaimStatus, Transition};

use ClaimStatus::*;

#[test]
fn legal_moves_apply() {
    assert_eq!(Pending.check(Approved), Transition::Apply);
    assert_eq!(Pending.check(Rejected), Transition::Apply);
    assert_eq!(Approved.check(Paid), Transition::Apply);
}

#[test]
fn same_state_is_noop() {
    for s in ClaimStatus::ALL {
        assert_eq!(s.check(s), Transition::NoOp, "{s} -> {s}");
    }
}

#[test]
fn everything_else_is_illegal() {
    let illegal = [
        (Pending, Paid),
        (Approved, Pending),
        (Approved, Rejected),
        (Rejected, Pending),
        (Rejected, Approved),
        (Rejected, Paid),
        (Paid, Pending),
        (Paid, Approved),
        (Paid, Rejected),
    ];
    for (from, to) in illegal {
        assert_eq!(from.check(to), Transition::Illegal, "{from} -> {to}");
    }
}

#[test]
fn terminal_states_have_no_way_out() {
    for from in [Rejected, Paid] {
        assert!(from.is_terminal());
        for to in ClaimStatus::ALL {
            assert_ne!(from.check(to), Transition::Apply, "{from} -> {to}");
        }
    }
    assert!(!Pending.is_terminal());
    assert!(!Approved.is_terminal());
}

#[test]
fn parse_is_lenient_about_case_and_spaces() {
    assert_eq!(ClaimStatus::parse(" Approved "), Some(Approved));
    assert_eq!(ClaimStatus::parse("PAID"), Some(Paid));
    assert_eq!(ClaimStatus::parse("refunded"), None);
    assert_eq!(ClaimStatus::from_db_str("Pending"), None);
}

#[test]
fn db_strings_roundtrip() {
    for s in ClaimStatus::ALL {
        assert_eq!(ClaimStatus::from_db_str(s.to_db_str()), Some(s));
        assert_eq!(s.to_string(), s.to_db_str());
    }
}
