use stock_sweep::{
    catalog::VariantRecord,
    config,
    filter::{selection, VariantFilter},
};

fn mk_variant(number: &str, in_stock: i64, active: bool, last_stock: bool) -> VariantRecord {
    VariantRecord {
        number: number.into(),
        article_name: format!("Artikel {number}"),
        in_stock,
        active,
        main_variant: false,
        last_stock,
    }
}

#[test]
fn default_selection_targets_sold_out_active_variants() {
    let filter = selection(&config::Job::default());
    assert_eq!(
        filter,
        VariantFilter {
            in_stock: 0,
            active: true,
            last_stock: None,
        }
    );
    assert!(filter.matches(&mk_variant("SW1", 0, true, false)));
    assert!(filter.matches(&mk_variant("SW2", 0, true, true)));
}

#[test]
fn stocked_or_inactive_variants_are_left_alone() {
    let filter = selection(&config::Job::default());
    assert!(!filter.matches(&mk_variant("SW1", 3, true, false)));
    assert!(!filter.matches(&mk_variant("SW2", 0, false, false)));
}

#[test]
fn oversold_is_not_zero_stock() {
    let filter = selection(&config::Job::default());
    assert!(!filter.matches(&mk_variant("SW1", -2, true, false)));
}

#[test]
fn last_stock_narrowing_is_opt_in() {
    let job = config::Job {
        only_last_stock: true,
        ..Default::default()
    };
    let filter = selection(&job);
    assert_eq!(filter.last_stock, Some(true));
    assert!(filter.matches(&mk_variant("SW1", 0, true, true)));
    assert!(!filter.matches(&mk_variant("SW2", 0, true, false)));
}
