mod tests_tokenizer_properties;
mod tests_line_scenarios;
