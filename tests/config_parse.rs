use stock_sweep::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../stock-sweep.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.catalog.page_size, 1000);
    assert!(!cfg.catalog.follow_pages);
    assert!(!cfg.output.out_dir.is_empty());
}

#[test]
fn defaults_keep_the_job_quiet() {
    let cfg = Config::default();
    assert!(!cfg.job.only_last_stock);
    assert!(!cfg.job.send_notification);
    assert!(cfg.job.notify_email.is_empty());
}

#[test]
fn partial_sections_fall_back_to_defaults() {
    let cfg: Config = toml::from_str("[job]\nonly_last_stock = true\n").expect("parse TOML");
    assert!(cfg.job.only_last_stock);
    assert!(!cfg.job.send_notification);
    assert_eq!(cfg.catalog.page_size, 1000);
    assert_eq!(cfg.mail.smtp_port, 25);
}

#[test]
fn fingerprint_input_is_stable() {
    let a = Config::default().normalized_for_hash();
    let b = Config::default().normalized_for_hash();
    assert_eq!(a, b);
    assert!(!a.is_empty());
}
