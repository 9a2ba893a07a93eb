use std::collections::HashSet;

use eddy_clifford::{duet, AlgebraCache, ProductTable, Sign};

const SIGNATURES: [&str; 7] = ["+", "-", "+++", "-++", "+-+-", "++--+", "-+-+-+"];

#[test]
fn test_scalar_row_and_column_are_identity() {
    for sig in SIGNATURES {
        let table = ProductTable::new(sig).unwrap();
        for i in 0..table.blade_count() {
            assert_eq!(table.result(0, i).unwrap(), i as i32 + 1, "{} row 0", sig);
            assert_eq!(table.result(i, 0).unwrap(), i as i32 + 1, "{} column 0", sig);
        }
    }
}

#[test]
fn test_rows_and_columns_are_signed_permutations() {
    for sig in SIGNATURES {
        let table = ProductTable::new(sig).unwrap();
        let count = table.blade_count();
        for r in 0..count {
            let row: HashSet<usize> = (0..count).map(|c| table.product(r, c).unwrap().1).collect();
            let col: HashSet<usize> = (0..count).map(|c| table.product(c, r).unwrap().1).collect();
            assert_eq!(row.len(), count, "{} row {}", sig, r);
            assert_eq!(col.len(), count, "{} column {}", sig, r);
        }
    }
}

#[test]
fn test_entries_match_blade_reduction() {
    for sig in SIGNATURES {
        let table = ProductTable::new(sig).unwrap();
        let basis = table.basis();
        for (r, left) in basis.blades().enumerate() {
            for (c, right) in basis.blades().enumerate() {
                let blade = duet::simplify(left, right, table.signature()).unwrap();
                let (sign, k) = table.product(r, c).unwrap();
                assert_eq!(sign, blade.sign());
                assert!(basis.blade(k).unwrap().eq_abs(&blade));
            }
        }
    }
}

#[test]
fn test_diagonal_is_scalar() {
    // every blade squares to ±1
    for sig in SIGNATURES {
        let table = ProductTable::new(sig).unwrap();
        for i in 0..table.blade_count() {
            assert_eq!(table.result(i, i).unwrap().abs(), 1, "{} blade {}", sig, i);
        }
    }
}

#[test]
fn test_commute_signs_are_complementary() {
    let table = ProductTable::new("+-+-").unwrap();
    let count = table.blade_count();
    for r in 0..count {
        for c in 0..count {
            let commute = table.commute_sign(r, c).unwrap();
            assert_eq!(commute + table.acommute_sign(r, c).unwrap(), 1);
            assert_eq!(commute, table.commute_sign(c, r).unwrap());
            let expected = table.result(r, c).unwrap() == table.result(c, r).unwrap();
            assert_eq!(commute == 1, expected);
        }
    }
}

#[test]
fn test_euclidean_and_mixed_scenarios() {
    // basis: 1 e1 e2 e3 e12 e13 e23 e123
    let euclid = ProductTable::new("+++").unwrap();
    assert_eq!(euclid.result(1, 2).unwrap(), 5);
    assert_eq!(euclid.result(2, 1).unwrap(), -5);
    assert_eq!(euclid.result(1, 1).unwrap(), 1);
    assert_eq!(euclid.result(7, 7).unwrap(), -1);
    // e12 e23 = e13, e23 e12 = -e13
    assert_eq!(euclid.result(4, 6).unwrap(), 6);
    assert_eq!(euclid.result(6, 4).unwrap(), -6);

    let mixed = ProductTable::new("-++").unwrap();
    assert_eq!(mixed.product(1, 1).unwrap(), (Sign::Neg, 0));
    assert_eq!(mixed.product(2, 2).unwrap(), (Sign::Pos, 0));
    // e12² = -e1² e2² = +1 when e1² = -1
    assert_eq!(mixed.product(4, 4).unwrap(), (Sign::Pos, 0));
    assert_eq!(mixed.product(5, 5).unwrap(), (Sign::Pos, 0));
    assert_eq!(mixed.product(6, 6).unwrap(), (Sign::Neg, 0));
}

#[test]
fn test_cached_tables_match_fresh_builds() {
    let cache = AlgebraCache::new();
    for sig in SIGNATURES {
        let cached = cache.product(sig).unwrap();
        let fresh = ProductTable::new(sig).unwrap();
        for r in 0..fresh.blade_count() {
            assert_eq!(cached.row(r).unwrap(), fresh.row(r).unwrap());
        }
    }
    // "+++" and "-++" share a basis
    assert_eq!(cache.stats().bases, 5);
}
