fn main() {
    lalrpop::process_root().expect("failed to process lalrpop grammars");
}
