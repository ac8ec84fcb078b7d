use quant_solver::utils::secrets::normalize_api_key;

#[test]
fn strips_whitespace_and_quotes() {
    assert_eq!(normalize_api_key("  sk-abc  "), "sk-abc");
    assert_eq!(normalize_api_key("\"sk-abc\""), "sk-abc");
    assert_eq!(normalize_api_key("“sk-abc”"), "sk-abc");
    assert_eq!(normalize_api_key("'sk-abc'"), "sk-abc");
}
