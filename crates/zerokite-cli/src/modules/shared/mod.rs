pub(crate) mod output;

pub(crate) use output::{
    format_fixed, format_price, number_or_zero, print_error_json, print_error_text,
    print_success_json, render_table, Column,
};
