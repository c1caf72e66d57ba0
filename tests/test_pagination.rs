use recipe_browser::paginate::{PageRequest, Window, envelope_of, window_of};

#[test]
fn test_window_and_envelope_agree_for_all_valid_inputs() {
    for total in [0u64, 1, 9, 10, 11, 99, 100, 101, 1000] {
        for limit in [1u32, 2, 3, 10, 33, 100] {
            let pages = total.div_ceil(u64::from(limit));
            for page in 1u32..=(pages as u32 + 2) {
                let window = window_of(page, limit);
                assert_eq!(window.offset, u64::from(page - 1) * u64::from(limit));
                assert_eq!(window.count, u64::from(limit));

                let envelope = envelope_of(total, page, limit);
                assert_eq!(envelope.pages, pages, "total={total} limit={limit}");
                assert_eq!(envelope.has_next, u64::from(page) < pages);
                assert_eq!(envelope.has_prev, page > 1);
                assert_eq!(envelope.total, total);
                assert_eq!(envelope.page, page);
                assert_eq!(envelope.limit, limit);
            }
        }
    }
}

#[test]
fn test_last_page_has_no_next() {
    let envelope = envelope_of(21, 3, 10);
    assert_eq!(envelope.pages, 3);
    assert!(!envelope.has_next);
    assert!(envelope.has_prev);
}

#[test]
fn test_page_beyond_the_end_still_reports_prev() {
    let envelope = envelope_of(5, 4, 10);
    assert_eq!(envelope.pages, 1);
    assert!(!envelope.has_next);
    assert!(envelope.has_prev);
}

#[test]
fn test_page_request_window() {
    let request = PageRequest::new(4, 25).expect("valid request");
    assert_eq!(
        request.window(),
        Window {
            offset: 75,
            count: 25
        }
    );
}

#[test]
fn test_page_request_rejects_out_of_range_values() {
    assert!(PageRequest::new(0, 10).is_err());
    assert!(PageRequest::new(1, 0).is_err());
    assert!(PageRequest::new(1, 101).is_err());
    assert!(PageRequest::from_raw(Some("1.5"), None, 10).is_err());
    assert!(PageRequest::from_raw(Some(""), None, 10).is_err());
}

#[test]
fn test_default_request() {
    let request = PageRequest::default();
    assert_eq!(request.page(), 1);
    assert_eq!(request.limit(), PageRequest::DEFAULT_LIMIT);
}
