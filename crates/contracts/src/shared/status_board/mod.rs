//! Доска статусов: таксономия плиток, фасет, нарезка страниц и контракт
//! поставщика записей. Без зависимостей от UI и HTTP.

pub mod facet;
pub mod paging;
pub mod provider;
pub mod taxonomy;

pub use facet::{BoardDefaults, FacetDimensions, FacetSelection};
pub use paging::{slice, total_pages, PageRequest, PageRequestError, PageResult, PageSlice};
pub use provider::{BoardError, PageDataProvider, ResolvedFacet};
pub use taxonomy::{
    build_taxonomy, compound_code, StatusGroup, StatusGroupConfig, StatusItem, StatusItemConfig,
    StatusTaxonomy, TaxonomyError,
};
