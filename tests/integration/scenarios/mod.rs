mod reactions;
