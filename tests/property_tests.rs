//! Property tests for leftover carry-over

use cliexpect::Session;
use proptest::prelude::*;
use std::io::Cursor;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A match ending before the end of accumulated text must leave
    /// exactly the unconsumed suffix for the next call: no bytes lost, no
    /// bytes duplicated.
    #[test]
    fn leftover_is_retained_exactly(
        first_body in "[a-z ]{1,40}",
        second_body in "[a-z ]{1,40}",
    ) {
        let (first, second) = tokio_test::block_on(async {
            let data = format!("{first_body}\nP>\n{second_body}\nP>");
            let mut session = Session::builder()
                .prompt("P>")
                .connect(
                    Box::new(Vec::<u8>::new()),
                    Box::new(Cursor::new(data.into_bytes())),
                )
                .unwrap();

            let first = session.retrieve().await.unwrap();
            let second = session.retrieve().await.unwrap();
            (first, second)
        });

        prop_assert_eq!(&first.matched, &format!("{first_body}\nP>"));
        prop_assert_eq!(&first.groups[0], &format!("{first_body}\n"));
        prop_assert_eq!(&second.matched, &format!("\n{second_body}\nP>"));
        prop_assert_eq!(&second.groups[0], &format!("\n{second_body}\n"));
    }
}
