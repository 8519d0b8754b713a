use sift_core::counter::{
    new_counter, CharCounter, CounterError, CountingMethod, TokenCounter, UnitCounter, WordCounter,
};

#[test]
fn word_counter_splits_on_any_whitespace() {
    let counter = WordCounter;
    assert_eq!(counter.count(""), 0);
    assert_eq!(counter.count("   \n\t "), 0);
    assert_eq!(counter.count("hello world"), 2);
    assert_eq!(counter.count("  one\ttwo\n\nthree  "), 3);
    assert_eq!(counter.count("café naïve résumé"), 3);
}

#[test]
fn char_counter_counts_scalar_values_not_bytes() {
    let counter = CharCounter;
    assert_eq!(counter.count(""), 0);
    assert_eq!(counter.count("hello 👋"), 7);
    assert_eq!(counter.count("naïve"), 5);
}

#[test]
fn token_counter_uses_cl100k() {
    let counter = TokenCounter::new().unwrap();
    assert_eq!(counter.count(""), 0);
    assert_eq!(counter.count("hello world"), 2);
    assert_eq!(counter.name(), "tokens (cl100k_base)");
    assert_eq!(counter.method(), CountingMethod::Tokens);
}

#[test]
fn counter_names() {
    assert_eq!(WordCounter.name(), "words");
    assert_eq!(CharCounter.name(), "characters");

    for method in [CountingMethod::Tokens, CountingMethod::Words, CountingMethod::Characters] {
        let counter = new_counter(method).unwrap();
        assert_eq!(counter.method(), method);
    }
}

#[test]
fn counting_method_parses_aliases() {
    assert_eq!("tokens".parse::<CountingMethod>().unwrap(), CountingMethod::Tokens);
    assert_eq!("Word".parse::<CountingMethod>().unwrap(), CountingMethod::Words);
    assert_eq!(" chars ".parse::<CountingMethod>().unwrap(), CountingMethod::Characters);
    assert_eq!(CountingMethod::default(), CountingMethod::Tokens);
    assert_eq!(CountingMethod::Characters.to_string(), "characters");

    let err = "bytes".parse::<CountingMethod>().unwrap_err();
    assert!(matches!(err, CounterError::UnknownMethod(ref m) if m == "bytes"));
}

#[test]
fn every_counter_offers_exact_truncation() {
    for method in [CountingMethod::Tokens, CountingMethod::Words, CountingMethod::Characters] {
        let counter = new_counter(method).unwrap();
        assert!(counter.exact_truncation().is_some(), "{method} should truncate exactly");
    }
}

#[test]
fn word_partial_text_keeps_original_spacing() {
    let counter = WordCounter;
    let exact = counter.exact_truncation().unwrap();

    assert_eq!(exact.create_partial_text("one  two\nthree four", 3), "one  two\nthree");
    assert_eq!(exact.create_partial_text("one two", 5), "one two");
    assert_eq!(exact.create_partial_text("one two", 0), "");
    assert_eq!(exact.create_partial_text("", 3), "");
}

#[test]
fn char_partial_text_respects_multibyte_boundaries() {
    let counter = CharCounter;
    let exact = counter.exact_truncation().unwrap();

    let partial = exact.create_partial_text("héllo wörld", 7);
    assert_eq!(partial, "héllo w");
    assert_eq!(counter.count(&partial), 7);
    assert_eq!(exact.create_partial_text("abc", 3), "abc");
}

#[test]
fn token_partial_text_hits_the_limit_exactly() {
    let counter = TokenCounter::new().unwrap();
    let exact = counter.exact_truncation().unwrap();
    let text = "The quick brown fox jumps over the lazy dog near the river bank.";

    let total = counter.count(text);
    assert!(total > 5);

    let partial = exact.create_partial_text(text, 5);
    assert_eq!(counter.count(&partial), 5);
    assert!(text.starts_with(&partial));

    assert_eq!(exact.create_partial_text(text, total), text);
    assert_eq!(exact.create_partial_text(text, 0), "");
}

#[test]
fn token_partial_text_is_exact_for_multilingual_text() {
    let counter = TokenCounter::new().unwrap();
    let exact = counter.exact_truncation().unwrap();
    let texts = [
        "Les élèves ont mangé des crêpes à la fête du village.",
        "Straße, naïve café, façade. 日本語のテキストも含まれています。",
        "hello 👋 world 🌍🚀 emoji 👨‍👩‍👧 family",
        "Große Übung: 東京 と 大阪 👋 ñandú",
    ];

    for text in texts {
        let total = counter.count(text);
        let cuts: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();

        for max in 1..total {
            let partial = exact.create_partial_text(text, max);
            let units = counter.count(&partial);

            assert!(text.starts_with(&partial), "{partial:?} is not a prefix of {text:?}");
            assert!(units <= max, "{max} tokens requested, {units} returned for {text:?}");

            let reachable = cuts.iter().any(|&cut| counter.count(&text[..cut]) == max);
            if reachable {
                assert_eq!(units, max, "missed an exact cut at {max} tokens in {text:?}");
            }
        }
    }
}
