//! ListAvailabilityHandler - Query handler for a sitter's calendar.

use std::sync::Arc;

use crate::domain::availability::{AvailabilityError, AvailabilitySlot};
use crate::ports::{AvailabilityFilter, AvailabilityReader};

/// Query for a sitter's availability slots.
#[derive(Debug, Clone)]
pub struct ListAvailabilityQuery {
    pub filter: AvailabilityFilter,
}

/// Handler for availability listings.
pub struct ListAvailabilityHandler {
    slots: Arc<dyn AvailabilityReader>,
}

impl ListAvailabilityHandler {
    pub fn new(slots: Arc<dyn AvailabilityReader>) -> Self {
        Self { slots }
    }

    pub async fn handle(
        &self,
        query: ListAvailabilityQuery,
    ) -> Result<Vec<AvailabilitySlot>, AvailabilityError> {
        Ok(self.slots.list(query.filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTimelineStore;
    use crate::domain::foundation::{SitterId, SlotId, TimeRange, Timestamp};
    use crate::ports::TimelineStore;

    fn range(start_hour: i64, end_hour: i64) -> TimeRange {
        TimeRange::new(
            Timestamp::from_unix_secs(start_hour * 3600),
            Timestamp::from_unix_secs(end_hour * 3600),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_slots_ordered_by_start() {
        let timeline = Arc::new(InMemoryTimelineStore::new());
        let sitter = SitterId::new();

        let mut tx = timeline.begin(sitter).await.unwrap();
        for (start, end) in [(14, 16), (8, 12)] {
            tx.insert_slot(&AvailabilitySlot::new(
                SlotId::new(),
                sitter,
                range(start, end),
            ))
            .await
            .unwrap();
        }
        tx.commit().await.unwrap();

        let handler = ListAvailabilityHandler::new(timeline);
        let slots = handler
            .handle(ListAvailabilityQuery {
                filter: AvailabilityFilter::ForSitter(sitter),
            })
            .await
            .unwrap();
        assert_eq!(slots.len(), 2);
        assert!(slots[0].range().start() < slots[1].range().start());
    }

    #[tokio::test]
    async fn other_sitters_slots_are_excluded() {
        let timeline = Arc::new(InMemoryTimelineStore::new());
        let sitter = SitterId::new();
        let other = SitterId::new();

        let mut tx = timeline.begin(other).await.unwrap();
        tx.insert_slot(&AvailabilitySlot::new(SlotId::new(), other, range(8, 12)))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let handler = ListAvailabilityHandler::new(timeline);
        let slots = handler
            .handle(ListAvailabilityQuery {
                filter: AvailabilityFilter::Mine(sitter),
            })
            .await
            .unwrap();
        assert!(slots.is_empty());
    }
}
