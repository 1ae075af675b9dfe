use super::*;

fn three() -> SuggestionRotator {
    SuggestionRotator::new(vec!["a".into(), "b".into(), "c".into()], Duration::from_secs(1))
}

#[test]
fn index_advances_every_interval_and_wraps() {
    let rotator = three();
    assert_eq!(rotator.index_at(Duration::ZERO), Some(0));
    assert_eq!(rotator.index_at(Duration::from_millis(999)), Some(0));
    assert_eq!(rotator.index_at(Duration::from_secs(1)), Some(1));
    assert_eq!(rotator.index_at(Duration::from_millis(2_500)), Some(2));
    assert_eq!(rotator.index_at(Duration::from_secs(3)), Some(0));
    assert_eq!(rotator.current_at(Duration::from_secs(4)), Some("b"));
}

#[test]
fn empty_list_has_no_current_suggestion() {
    let rotator = SuggestionRotator::new(Vec::new(), Duration::from_secs(1));
    assert!(rotator.is_empty());
    assert_eq!(rotator.index_at(Duration::from_secs(10)), None);
    assert_eq!(rotator.current_at(Duration::ZERO), None);
}

#[test]
fn zero_interval_is_clamped() {
    let rotator = SuggestionRotator::new(vec!["a".into(), "b".into()], Duration::ZERO);
    assert_eq!(rotator.interval(), Duration::from_millis(MIN_ROTATION_INTERVAL_MS));
    assert_eq!(rotator.index_at(Duration::from_millis(MIN_ROTATION_INTERVAL_MS)), Some(1));
}

#[test]
fn from_config_uses_suggestions_and_interval() {
    let config = WidgetConfig {
        suggestions: vec!["x".into(), "y".into()],
        rotation_interval_ms: 1_500,
        ..WidgetConfig::default()
    };
    let rotator = SuggestionRotator::from_config(&config);
    assert_eq!(rotator.suggestions(), ["x".to_owned(), "y".to_owned()]);
    assert_eq!(rotator.interval(), Duration::from_millis(1_500));
    assert_eq!(rotator.get(1), Some("y"));
    assert_eq!(rotator.get(2), None);
}

#[tokio::test(start_paused = true)]
async fn ticker_yields_next_index_each_interval() {
    let rotator = three();
    let mut ticker = rotator.ticker();
    let started = Instant::now();

    assert_eq!(ticker.index(), 0);
    assert_eq!(ticker.tick().await, 1);
    assert_eq!(started.elapsed(), Duration::from_secs(1));
    assert_eq!(ticker.tick().await, 2);
    assert_eq!(ticker.tick().await, 0);
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn ticker_never_fires_for_single_suggestion() {
    let rotator = SuggestionRotator::new(vec!["only".into()], Duration::from_secs(1));
    let mut ticker = rotator.ticker();

    let fired = tokio::time::timeout(Duration::from_secs(60), ticker.tick()).await;
    assert!(fired.is_err());
    assert_eq!(ticker.index(), 0);
}
