mod proptest_formatting;
