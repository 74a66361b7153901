use curewise::infrastructure::speech::chunk_for_synthesis;

#[test]
fn given_short_text_when_chunking_then_single_chunk() {
    assert_eq!(
        chunk_for_synthesis("Rest and hydrate.", 200),
        vec!["Rest and hydrate.".to_string()]
    );
}

#[test]
fn given_long_text_when_chunking_then_every_chunk_fits_the_limit() {
    let text = "You should rest, drink plenty of fluids, and monitor your temperature. "
        .repeat(10);
    let chunks = chunk_for_synthesis(&text, 200);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 200, "oversized chunk: {}", chunk);
    }
}

#[test]
fn given_long_text_when_chunking_then_no_words_are_lost_or_split() {
    let text = "fever chills fatigue headache nausea dizziness".repeat(20);
    let original: Vec<&str> = text.split_whitespace().collect();

    let chunks = chunk_for_synthesis(&text, 50);
    let rejoined = chunks.join(" ");
    let words: Vec<&str> = rejoined.split_whitespace().collect();

    assert_eq!(words.len(), original.len());
}

#[test]
fn given_single_word_longer_than_limit_when_chunking_then_it_is_split_hard() {
    let word = "a".repeat(450);
    let chunks = chunk_for_synthesis(&word, 200);

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].len(), 200);
    assert_eq!(chunks[1].len(), 200);
    assert_eq!(chunks[2].len(), 50);
}

#[test]
fn given_empty_text_when_chunking_then_no_chunks() {
    assert!(chunk_for_synthesis("", 200).is_empty());
    assert!(chunk_for_synthesis("   ", 200).is_empty());
}
