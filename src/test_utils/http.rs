use axum_test::TestResponse;

#[track_caller]
pub(crate) fn assert_content_type(response: &TestResponse, content_type: &str) {
    assert_eq!(get_header(response, "content-type"), content_type);
}

#[track_caller]
pub(crate) fn get_header(response: &TestResponse, header_name: &str) -> String {
    response
        .header(header_name)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}
