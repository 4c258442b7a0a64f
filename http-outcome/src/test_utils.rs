use std::str::FromStr;
use std::sync::Arc;

use reqwest::Method;

use crate::RequestOptions;

pub fn options(
    method: &'static str,
    url: &'static str,
) -> Arc<RequestOptions> {
    Arc::new(
        RequestOptions::new(Method::from_str(method).unwrap(), url).unwrap()
    )
}

pub fn errmsg<T>(r: anyhow::Result<T>) -> String {
    match r {
        Ok(_) => panic!("expected an Err!"),
        Err(e) => e.to_string(),
    }
}

macro_rules! assert_err(
    ($code:expr, $expectation:expr)=>{
        assert_eq!(
            crate::test_utils::errmsg(
                $code
            ),
            $expectation
        );
    };
);
