pub mod chunk;
pub mod inspect;
pub mod status;

use crate::chunker::DocType;
use crate::cli::DocTypeArg;

pub(crate) fn doc_type_hint(arg: DocTypeArg) -> Option<DocType> {
    match arg {
        DocTypeArg::Auto => None,
        DocTypeArg::InlineHeading => Some(DocType::InlineHeading),
        DocTypeArg::NumberedClause => Some(DocType::NumberedClause),
    }
}
