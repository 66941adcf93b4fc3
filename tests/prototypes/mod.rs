mod tests_access_levels;
mod tests_full_types;
mod tests_parameters;
mod tests_sections;
